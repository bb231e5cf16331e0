// Prompt composition: the studio-wide preamble plus the per-skill block.

/// Studio-wide operating rules shared verbatim by every composed prompt.
pub const PREAMBLE: &str = r#"You are Studio Agent for Eliran’s real-world production studio in Israel (pop-ups, installations, set builds, props, printing, logistics, rentals).

GLOBAL OPERATING RULES (non-negotiable)
- This prompt is written in English. When you write user-facing narrative, write in Hebrew by default.
- Currency: ₪ (NIS) unless the project explicitly uses a different currency.
- Production reality: lead times, vendor availability, weekends/holidays, traffic, and last-minute site constraints are real. Plan buffers.
- Canonical structure: Project → Elements → Tasks → Accounting → Quote.
  - Every Task maps to exactly one Element (or project overhead).
  - Every Accounting line maps to exactly one Element (or project overhead).
  - Quote is a snapshot of the exact Approved Elements set at generation time.
- Source of truth: Approved Elements are grounding truth. Never overwrite approved truth directly.
  - If new info conflicts with approved elements, flag a conflict and ask for a decision.
- Never do destructive edits directly.
  - When edits are required: propose a pending ChangeSet (patchOps) for user approval.
  - Prefer tombstone/unlink over remove.
- Estimation discipline:
  - Use studio catalog/rates/price memory first. If missing, estimate with ranges and label "הערכה" + assumptions.
  - Avoid fake precision. Call out unknown measurements, unclear site access, or missing artwork.
  - Separate Labor (Studio) vs Labor (Install). Include friction hours (loading, cleanup, fixes).
- Printing discipline:
  - Brand/print-critical work requires proof and often test print. QA must pass before ordering.
  - Never claim print readiness without spec + file QA.
- Rentals discipline:
  - Rentals include reserve→confirm→pickup→condition photos→install→return→deposit release.
- Safety discipline:
  - Flag stability/anchors, sharp edges, crowd interaction, electrical, fire lanes, and heavy lifts.
  - When uncertain, recommend a qualified safety/engineering check.

OUTPUT RULE
- Output MUST be valid JSON that matches the provided outputSchema exactly.
- Do NOT include any prose outside the JSON object.
"#;

/// Last line of [`PREAMBLE`] followed by the blank separator line.
/// Everything up to and including it is shared by all composed prompts.
pub const PREAMBLE_END_MARKER: &str = "- Do NOT include any prose outside the JSON object.\n\n";

pub const FENCE_OPEN: &str = "```text\n";
pub const FENCE_CLOSE: &str = "\n```";

/// Focus used by question packs that have no dedicated entry.
pub const GENERIC_QUESTIONS_FOCUS: &str = "- Ask the 5 highest-impact questions to unblock the next step.\n- Prefer measurable constraints over open-ended chat.";

const QUESTION_PACK_GOAL: &str =
    "Ask exactly 5 high-impact questions that unblock the next studio step without wasting time.";

const QUESTION_PACK_RULES: &str = "- Ask EXACTLY 5 questions.
- At most 1 broad open-ended question; prefer measurable constraints (sizes, dates, budget band, access hours, approvals).
- Do not repeat already-answered questions.
- If a measurement/spec/file blocks execution/quote/print, ask for it explicitly.
- Prefer picklists (select/multi) when you can.";

const QUESTION_PACK_OUTPUT: &str = "- Output exactly 5 question objects using the provided outputSchema.";

/// The five sections of a regular skill prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSpec<'a> {
    pub goal: &'a str,
    pub when_use: &'a str,
    pub when_not: &'a str,
    pub process: &'a str,
    pub quality: &'a str,
}

/// Per-skill block for a regular skill (`SKILL` through `QUALITY GATES`).
pub fn skill_block(skill_key: &str, spec: &PromptSpec<'_>) -> String {
    format!(
        "SKILL\n- skillKey: {}\n- Goal: {}\n\nWHEN TO USE\n{}\n\nWHEN NOT TO USE\n{}\n\nPROCESS\n{}\n\nQUALITY GATES\n{}",
        skill_key,
        spec.goal.trim(),
        spec.when_use.trim(),
        spec.when_not.trim(),
        spec.process.trim(),
        spec.quality.trim(),
    )
}

/// Per-skill block for a five-question pack.
pub fn questions_pack_block(skill_key: &str, focus: &str) -> String {
    format!(
        "SKILL\n- skillKey: {}\n- Goal: {}\n\nQUESTION PACK RULES\n{}\n\nFOCUS\n{}\n\nOUTPUT\n{}",
        skill_key,
        QUESTION_PACK_GOAL,
        QUESTION_PACK_RULES,
        focus.trim(),
        QUESTION_PACK_OUTPUT,
    )
}

/// Join preamble and block, optionally wrapping the result in a `text` fence.
pub fn compose(preamble: &str, block: &str, fence: bool) -> String {
    let preamble = preamble.trim();
    let mut out = String::with_capacity(preamble.len() + block.len() + 16);
    if fence {
        out.push_str(FENCE_OPEN);
    }
    if !preamble.is_empty() {
        out.push_str(preamble);
        out.push_str("\n\n");
    }
    out.push_str(block.trim_end());
    if fence {
        out.push_str(FENCE_CLOSE);
    }
    out
}
