use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

use super::templates::PromptSpec;

/// Lifecycle stages that carry a default template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Printing,
    Procurement,
    Scheduling,
    Trello,
    Critique,
    Retro,
    Ideation,
    Planning,
    Solutioning,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Printing,
        Stage::Procurement,
        Stage::Scheduling,
        Stage::Trello,
        Stage::Critique,
        Stage::Retro,
        Stage::Ideation,
        Stage::Planning,
        Stage::Solutioning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Printing => "printing",
            Stage::Procurement => "procurement",
            Stage::Scheduling => "scheduling",
            Stage::Trello => "trello",
            Stage::Critique => "critique",
            Stage::Retro => "retro",
            Stage::Ideation => "ideation",
            Stage::Planning => "planning",
            Stage::Solutioning => "solutioning",
        }
    }

    /// Ideation, planning and solutioning share one template whose goal
    /// names the stage.
    pub fn is_design_stage(&self) -> bool {
        matches!(self, Stage::Ideation | Stage::Planning | Stage::Solutioning)
    }

    /// Goal line for this stage's template.
    pub fn goal(&self) -> String {
        if self.is_design_stage() {
            format!(
                "Advance the {} stage with studio-real decisions that reduce rework and keep artifacts consistent.",
                self.as_str()
            )
        } else {
            self.fixed_spec().goal.to_string()
        }
    }

    /// Template sections; `goal` is filled in by the caller from [`Stage::goal`].
    pub fn spec<'a>(&self, goal: &'a str) -> PromptSpec<'a> {
        PromptSpec {
            goal,
            ..self.fixed_spec()
        }
    }

    fn fixed_spec(&self) -> PromptSpec<'static> {
        match self {
            Stage::Printing => PromptSpec {
                goal: "Advance printing workflow safely (spec → file QA → vendor pack → order tracking) without skipping proof gates.",
                when_use: "- Use when print deliverables exist or artwork/specs are being discussed.",
                when_not: "- Do NOT claim readiness or order prints without spec + QA + (when needed) proof/test-print.",
                process: "1) Identify what is being printed and for which element.\n2) Ensure spec is complete (substrate, size, qty, finish, mounting).\n3) Enforce proof/QA gates before ordering.\n4) Output only schema JSON.",
                quality: "- Be explicit about missing print-critical inputs.\n- Never skip proof/test-print when brand-critical.",
            },
            Stage::Procurement => PromptSpec {
                goal: "Advance procurement realistically: lead times, deposits, deliveries/pickups, and gating dependencies.",
                when_use: "- Use when materials/vendors/rentals need to be purchased or coordinated.",
                when_not: "- Do NOT invent vendor names or claim research ran unless the tool actually ran.",
                process: "1) Convert needs into a deduped list mapped to elements/tasks.\n2) Flag lead-time items and gating (approval, proof, measurements).\n3) Include rentals reserve/confirm/pickup/return/deposit steps when relevant.\n4) Output only schema JSON.",
                quality: "- Everything maps to element or overhead.\n- Respect printing and approval gates.",
            },
            Stage::Scheduling => PromptSpec {
                goal: "Produce a realistic schedule/critical path that respects lead times, proofs, cure times, and install windows.",
                when_use: "- Use when the user asks for timeline, dates, or dependencies.",
                when_not: "- Do NOT invent hard dates if install window is unknown; schedule relative to Install Day.",
                process: "1) Identify install/strike constraints (or flag missing).\n2) Build dependencies (proof before print order; deliveries before install).\n3) Add buffers for Israel reality.\n4) Output only schema JSON.",
                quality: "- No impossible ordering.\n- Explicitly account for printing and rentals gating.",
            },
            Stage::Trello => PromptSpec {
                goal: "Translate studio plan (elements/tasks/status) into Trello-safe sync artifacts without losing traceability.",
                when_use: "- Use when the user requests Trello export/sync/board mapping.",
                when_not: "- Do NOT destroy or overwrite cards blindly; validate mapping and propose changes safely.",
                process: "1) Map Elements→lists/labels and Tasks→cards/checklists as defined by schema.\n2) Preserve IDs/links for future sync.\n3) Validate plan before executing.\n4) Output only schema JSON.",
                quality: "- No duplicate card creation when IDs already exist.\n- Keep element/task traceability.",
            },
            Stage::Critique => PromptSpec {
                goal: "Critique plans for studio realism: missing steps, wrong assumptions, gating issues, safety/site constraints.",
                when_use: "- Use before committing to a quote/order/build.",
                when_not: "- Do NOT rewrite everything; identify issues, severity, and minimal fixes.",
                process: "1) Check consistency: elements↔tasks↔accounting.\n2) Check printing/rentals/safety gating.\n3) Output prioritized critique and recommended fixes.",
                quality: "- Actionable and specific.\n- Don’t invent facts; flag missing inputs.",
            },
            Stage::Retro => PromptSpec {
                goal: "Capture lessons learned and update studio memory for future quoting/execution.",
                when_use: "- Use after project completion or major milestone.",
                when_not: "- Do NOT blame; focus on systems/checklists/rates.",
                process: "1) Summarize what happened (Hebrew).\n2) Identify repeatable lessons (pricing, checklists, vendor lead times, printing issues).\n3) Propose memory updates in schema.\n4) Output only schema JSON.",
                quality: "- Tie lessons to concrete events/cost/time deltas.\n- Keep changes non-destructive.",
            },
            Stage::Ideation | Stage::Planning | Stage::Solutioning => PromptSpec {
                goal: "",
                when_use: "- Use when this stage is active and you need a structured artifact output.",
                when_not: "- Do NOT guess critical constraints; ask for missing blockers.\n- Do NOT do destructive edits; propose ChangeSets.",
                process: "1) Read constraints and Approved Elements truth.\n2) Produce the smallest artifact that unblocks production.\n3) Flag risks and missing blockers.\n4) Output only schema JSON.",
                quality: "- Studio-realistic (lead times, access, proofs).\n- Traceable to elements/tasks/accounting.",
            },
        }
    }
}

impl FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "printing" => Ok(Stage::Printing),
            "procurement" => Ok(Stage::Procurement),
            "scheduling" => Ok(Stage::Scheduling),
            "trello" => Ok(Stage::Trello),
            "critique" => Ok(Stage::Critique),
            "retro" => Ok(Stage::Retro),
            "ideation" => Ok(Stage::Ideation),
            "planning" => Ok(Stage::Planning),
            "solutioning" => Ok(Stage::Solutioning),
            _ => bail!("Unknown stage: {}", s),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
