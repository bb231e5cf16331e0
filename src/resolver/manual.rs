//! Hand-authored prompts and question-pack focus texts, keyed by `skillKey`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::templates::PromptSpec;

/// A curated entry in the exact-match table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualEntry {
    Skill(PromptSpec<'static>),
    QuestionPack { focus: &'static str },
}

static MANUAL: Lazy<HashMap<&'static str, ManualEntry>> = Lazy::new(|| {
    use ManualEntry::{QuestionPack, Skill};

    HashMap::from([
        // controller / router / ux
        (
            "controller.autonomousPlanner",
            Skill(PromptSpec {
                goal: "Drive the studio MVP loop end-to-end (clarify → elements → tasks → procurement/printing gates → cost model → quote → critique → improve), stopping at question/approval gates.",
                when_use: "- Use when the user asks what’s next or requests a plan/quote/tasks, or the workspace is missing multiple core artifacts.",
                when_not: "- Do NOT use for single narrow actions when a dedicated skill exists (e.g., printing QA, trello sync).\n- Do NOT proceed when quote/build blockers exist; ask questions instead.",
                process: "1) Read workspace state: brief, elements (Approved?), tasks, accounting, printing/procurement status, schedule constraints.
2) Identify the biggest blocker (often: measurements/site access, approvals, print spec/files).
3) If blocked: return mode=ask_questions with exactly 5 questions (or route to the appropriate questionsPack5).
4) If edits are required: return mode=pending_changeset with patchOps (no destructive edits).
5) Otherwise: return mode=run_skill with the smallest next skill that creates the next missing artifact.
6) Self-critique: tasks↔accounting consistency, print proof gates, rentals steps, safety/site constraints.
7) assistantSummary in Hebrew: what changed, what’s blocked, what’s next.",
                quality: "- Never advance to quote/procurement if Approved Elements are missing or scope is unclear.\n- Don’t double count labor; avoid orphan purchases.\n- Enforce printing and rentals gating.",
            }),
        ),
        (
            "router.stageChannelSkill",
            Skill(PromptSpec {
                goal: "Route userMessage to the best stage + channel + next skill based on workspace gaps (avoid rework).",
                when_use: "- Use whenever you need to decide what skill should run next.",
                when_not: "- Do NOT generate plans/tasks/prices here; route only.",
                process: "1) Classify intent: clarify, ideation, planning/tasks, solutioning detail, procurement/prices, scheduling, printing, trello, critique, retro.
2) Detect blockers: missing measurements, install window/site access, approvals, print specs/files, missing approved scope.
3) If blockers exist: pick the appropriate *questionsPack5* and set channel=structured_questions.
4) Otherwise: pick the smallest next skill that advances the next artifact.
5) Respect uiPins unless unsafe/destructive.",
                quality: "- Never hallucinate missing workspace facts; list as missingCritical.\n- Prefer printing stage when artwork/בית דפוס is mentioned.\n- Prefer procurement when lead times/purchases are involved.",
            }),
        ),
        (
            "router.scopeResolver",
            Skill(PromptSpec {
                goal: "Resolve whether the request targets project, elements, tasks, accounting/quote, procurement, printing, trello, or knowledge.",
                when_use: "- Use when the user message is ambiguous and you must know which entities it targets.",
                when_not: "- Do NOT invent IDs. If mapping is uncertain, keep scope broad and explain ambiguity.",
                process: "1) Extract mentions and keywords (quote, buy, print, install, trello).
2) Fuzzy match to knownElements/knownTasks; never fabricate IDs.
3) If multiple candidates: return low confidence and explain what collides.
4) Output scope + elementIds/taskIds + confidence + notes.",
                quality: "- elementIds/taskIds must be empty if not confidently mapped.\n- Notes must say what to clarify.",
            }),
        ),
        (
            "ux.suggestedActionsTop3",
            Skill(PromptSpec {
                goal: "Suggest 3 concrete next actions (buttons) and a ranked fallback list, aligned to studio blockers.",
                when_use: "- Use after any step to keep the operator moving.",
                when_not: "- Do NOT suggest actions that require missing critical inputs unless it’s a question pack.",
                process: "1) Identify the single biggest blocker (measurements, approvals, print spec/files, missing tasks/accounting).
2) Choose 3 diverse but relevant skills.
3) If pendingChangeSet exists, prioritize reviewer/apply suggestions.
4) Explain why in production terms (lead time, install window, proof gate).",
                quality: "- Exactly 3 suggestions.\n- Avoid 3 question packs unless everything is blocked.",
            }),
        ),
        (
            "ux.threadSummarizer",
            Skill(PromptSpec {
                goal: "Maintain a short rolling summary in Hebrew plus pending decisions and confirmed decisions.",
                when_use: "- Use to keep the operator oriented.",
                when_not: "- Do NOT add new ideas; summarize only.",
                process: "1) Summarize facts/decisions in Hebrew (5–10 lines).\n2) List pending decisions/questions.\n3) List confirmed decisions.\n4) Keep it scanable.",
                quality: "- No speculation.\n- Don’t invent facts.",
            }),
        ),
        // ideation
        (
            "ideation.questionsPack5",
            QuestionPack {
                focus: "- Unlock 2–3 viable concept directions + ROM budget.\n- Ask about: goal/audience, location & footprint, deadline + install window, budget band, style refs + brand assets ownership, site constraints (no drilling/fire rules/access hours).",
            },
        ),
        (
            "ideation.elementIdeas",
            Skill(PromptSpec {
                goal: "Generate buildable concept directions as Elements (build vs print vs rental), optimized for fast install/strike and transport.",
                when_use: "- Use once the brief exists (even partial).",
                when_not: "- Do NOT propose unsafe/unbuildable ideas; state assumptions if dimensions/site rules are missing.",
                process: "1) Propose 3 directions (WOW/modular/lean).\n2) For each: list Elements and likely method (build/print/rental/outsource).\n3) Call out install approach and risks.\n4) Flag printing proof/test-print needs.\n5) Recommend one direction.",
                quality: "- Buildable in Israel with real lead times.\n- Include at least one reuse/modular option.\n- Label assumptions as הַעֲרָכָה.",
            }),
        ),
        (
            "ideation.romBudgetEstimator",
            Skill(PromptSpec {
                goal: "Estimate ROM budget ranges per concept with real cost drivers and explicit uncertainty.",
                when_use: "- Use after concept directions exist to choose feasibility.",
                when_not: "- Do NOT output single-point costs when sizes/quantities are unknown.",
                process: "1) For each concept: Low/Mid/High (₪) and bucket breakdown.\n2) List top cost drivers.\n3) List assumptions + what to confirm next.",
                quality: "- Ranges over fake precision.\n- State scaling assumptions when size/quantity missing.",
            }),
        ),
        (
            "ideation.styleConstraintsExtractor",
            Skill(PromptSpec {
                goal: "Extract structured style + operational constraints from references for planning/printing.",
                when_use: "- Use when you have references (text/links/notes) and need a normalized style brief.",
                when_not: "- Do NOT invent brand rules; mark hypotheses clearly.",
                process: "1) Extract finish level/materials vibe/palette hints.\n2) Extract site/operational constraints (no drilling, outdoor, crowd touch).\n3) Output keywords for printing substrates/finishes/vendors.",
                quality: "- Phrase uncertain items as hypotheses.\n- Never fabricate a guideline document.",
            }),
        ),
        // planning
        (
            "planning.questionsPack5",
            QuestionPack {
                focus: "- Lock scope enough for a quote that survives install day.\n- Ask about: final dimensions/qty, site access + install/strike window, approval owner + deadline, printing specs/files ownership, budget tolerance for options.",
            },
        ),
        (
            "planning.milestonesPhasesBuilder",
            Skill(PromptSpec {
                goal: "Build studio-real phases + milestones with measurable acceptance, including printing and rentals gating.",
                when_use: "- Use once elements exist to create the production skeleton.",
                when_not: "- Do NOT invent dates; define ordering and acceptance criteria.",
                process: "1) Build phases from intake→install→strike/return→retro.\n2) Define milestones with acceptance criteria (proof approved, prints delivered, rentals confirmed).\n3) List dependencies + top risks.",
                quality: "- Include proof/test-print milestones when graphics matter.\n- Include rentals reserve/confirm/pickup/return steps.",
            }),
        ),
        (
            "planning.taskBreakdownQuoteLevel",
            Skill(PromptSpec {
                goal: "Generate quote-ready tasks mapped to elements with estimates, deps, purchase flags, and a ChangeSet.",
                when_use: "- Use after elements exist to create/refine the first task plan.",
                when_not: "- Do NOT delete tasks; tombstone if needed. Avoid ultra-micro steps.",
                process: "1) Create tasks by phase per element.\n2) Include QA tasks (finish/test assembly/print proof).\n3) Include install logistics tasks (tools/parking/access).\n4) Set estimates + needsPurchase.\n5) Output proposedChangeSet (patchOps).",
                quality: "- Tasks must map to exactly one element or overhead.\n- Include packaging/loading steps.\n- No impossible ordering (QA before ordering prints).",
            }),
        ),
    ])
});

static QUESTIONS_FOCUS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "ideation.questionsPack5",
            "- Unlock 2–3 viable concept directions + ROM budget.\n- Ask about: goal/audience, location & footprint, deadline + install window, budget band, style refs + brand assets ownership, site constraints (no drilling/fire rules/access hours).",
        ),
        (
            "planning.questionsPack5",
            "- Lock scope enough for a quote that survives install day.\n- Ask about: final dimensions/qty, site access + install/strike window, approval owner + deadline, printing specs/files ownership.",
        ),
        (
            "solutioning.questionsPack5",
            "- Eliminate execution uncertainty for a specific element (mounting, structure, finish, tolerances, transport, safety).\n- Ask about: attachment method, weight/size, finish expectation, environment (indoor/outdoor), on-site access/tools.",
        ),
        (
            "printing.questionsPack5",
            "- Unblock print ordering safely.\n- Ask about: substrate, size/qty, finish (matte/gloss/lam), mounting method, deadlines, file ownership (who provides artwork), proof/test-print expectation.",
        ),
        (
            "retro.questionsPack5",
            "- Capture what happened and why for studio learning.\n- Ask about: what went well, what broke, biggest time sink, biggest surprise cost, what checklist/task would prevent it next time.",
        ),
        (
            "image.questionsPack5",
            "- Gather exactly what is needed to generate the requested image asset.\n- Ask about: purpose (client vs internal), style refs, dimensions/aspect ratio, key elements to show, what must be accurate vs illustrative.",
        ),
    ])
});

/// Look up a curated prompt by exact `skillKey`.
pub fn lookup(skill_key: &str) -> Option<&'static ManualEntry> {
    MANUAL.get(skill_key)
}

/// Focus text for a question pack, if the pack has a dedicated one.
pub fn questions_focus(skill_key: &str) -> Option<&'static str> {
    QUESTIONS_FOCUS.get(skill_key).copied()
}

/// All curated keys, sorted.
pub fn manual_keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = MANUAL.keys().copied().collect();
    keys.sort_unstable();
    keys
}
