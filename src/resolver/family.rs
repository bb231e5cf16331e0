use std::fmt;

use super::templates::PromptSpec;

/// Skill families selected by the first dot segment of a `skillKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Accounting,
    Tasks,
    Elements,
    ChangeSet,
    Quality,
    Research,
    Logistics,
    Image,
}

impl Family {
    pub const ALL: [Family; 8] = [
        Family::Accounting,
        Family::Tasks,
        Family::Elements,
        Family::ChangeSet,
        Family::Quality,
        Family::Research,
        Family::Logistics,
        Family::Image,
    ];

    /// Family for a key like `accounting.costModel`. Keys without a dot
    /// never belong to a family.
    pub fn from_skill_key(skill_key: &str) -> Option<Self> {
        let (prefix, _) = skill_key.split_once('.')?;
        match prefix {
            "accounting" => Some(Family::Accounting),
            "tasks" => Some(Family::Tasks),
            "elements" => Some(Family::Elements),
            "changeset" | "reconcile" => Some(Family::ChangeSet),
            "quality" => Some(Family::Quality),
            "research" => Some(Family::Research),
            "logistics" | "safety" => Some(Family::Logistics),
            "image" => Some(Family::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Accounting => "accounting",
            Family::Tasks => "tasks",
            Family::Elements => "elements",
            Family::ChangeSet => "changeset",
            Family::Quality => "quality",
            Family::Research => "research",
            Family::Logistics => "logistics",
            Family::Image => "image",
        }
    }

    pub fn spec(&self) -> PromptSpec<'static> {
        match self {
            Family::Accounting => PromptSpec {
                goal: "Handle studio accounting/quote artifacts with element-level traceability and honest uncertainty.",
                when_use: "- Use when building cost models, drafting quotes, ingesting actuals, or analyzing deltas.",
                when_not: "- Do NOT include unapproved scope in quotes.\n- Do NOT fabricate exact prices; use ranges and label assumptions.",
                process: "1) Keep mapping: line item → element/overhead.\n2) Separate Labor Studio vs Labor Install + friction.\n3) Carry printing/rentals deposits and return steps explicitly.\n4) Output only schema JSON.",
                quality: "- No double counting.\n- Clear assumptions/exclusions for client-facing outputs.",
            },
            Family::Tasks => PromptSpec {
                goal: "Refine tasks into studio-executable steps with realistic dependencies, estimates, and QC/packaging coverage.",
                when_use: "- Use when tasks are vague, missing DoD, missing dependencies, or missing typical studio steps.",
                when_not: "- Do NOT delete tasks; propose ChangeSet edits.\n- Do NOT change approved scope without flagging a change request.",
                process: "1) Fix titles (verb + object), estimates, and DoD.\n2) Add dependencies (proof→order→deliver→install; cure times).\n3) Add missing tasks (packaging/loading, condition photos for rentals, return/deposit release).\n4) Output only schema JSON.",
                quality: "- Practical granularity; avoid micro-tasks.\n- Traceable to elements.",
            },
            Family::Elements => PromptSpec {
                goal: "Create/update Elements as deliverables that reflect studio reality (build/print/rental/outsource), preserving approvals via ChangeSets.",
                when_use: "- Use when converting a brief into elements or proposing element edits.",
                when_not: "- Do NOT overwrite Approved Elements directly; propose ChangeSets.",
                process: "1) Define elements as concrete deliverables with measurable acceptance.\n2) Attach likely method (build/print/rental/outsource) and key constraints.\n3) Flag missing measurements and site rules.\n4) Output only schema JSON.",
                quality: "- Elements must be quotable and taskable.\n- Conflicts with approved truth must be flagged.",
            },
            Family::ChangeSet => PromptSpec {
                goal: "Propose/review non-destructive ChangeSets that preserve history and keep artifacts consistent (elements↔tasks↔accounting).",
                when_use: "- Use when edits are needed or inconsistencies exist.",
                when_not: "- Do NOT apply destructive ops directly; propose patchOps and require approval.",
                process: "1) Identify inconsistencies and root cause.\n2) Propose minimal patchOps with clear summary and riskFlags.\n3) Prefer tombstone/unlink over remove.\n4) Output only schema JSON.",
                quality: "- No orphan tasks/accounting lines.\n- Safe, minimal diffs.",
            },
            Family::Quality => PromptSpec {
                goal: "Validate prompts/outputs against schemas and studio rules; report precise failures and safe corrections.",
                when_use: "- Use when outputs look wrong, schema validation fails, or prompts drift from studio rules.",
                when_not: "- Do NOT change data directly; propose corrections in the format required by schema.",
                process: "1) Validate required keys/types and additionalProperties constraints.\n2) Check for studio-rule violations (destructive edits, missing proof gates, missing rentals steps).\n3) Output errors with exact paths and suggested fixes.",
                quality: "- Precise, minimal, schema-grounded feedback.",
            },
            Family::Research => PromptSpec {
                goal: "Plan research queries that will actually unblock purchasing/printing/method choices.",
                when_use: "- Use before online research to avoid time waste.",
                when_not: "- Do NOT pretend research was performed.",
                process: "1) Identify what must be answered (spec, price, ETA, method).\n2) Produce targeted queries and evaluation criteria.\n3) Output only schema JSON.",
                quality: "- Queries must be actionable and tied to decisions.",
            },
            Family::Logistics => PromptSpec {
                goal: "Plan install/site logistics and safety checks for temporary builds in public spaces.",
                when_use: "- Use when planning install day, site constraints, anchors, heavy lifts, electrical, crowd flow.",
                when_not: "- Do NOT claim compliance if requirements are unknown; flag missing info and recommend qualified checks.",
                process: "1) Gather site constraints (access hours, elevator, parking, no drilling, fire lanes, permits).\n2) Produce checklists and risk mitigations.\n3) Ensure rentals and printing delivery timing is aligned.\n4) Output only schema JSON.",
                quality: "- Safety-first.\n- Concrete checklist items, not vague warnings.",
            },
            Family::Image => PromptSpec {
                goal: "Generate image-generation instructions/prompts that are faithful to the studio element and client context (not fantasy renders).",
                when_use: "- Use when the user needs an illustration/render/tech sketch/diagram/mockup.",
                when_not: "- Do NOT invent physical constraints; ask questions if dimensions/mounting are unknown.",
                process: "1) Clarify purpose (client-facing vs internal tech).\n2) Encode constraints: dimensions/aspect, materials vibe, key elements, what must be accurate.\n3) Include annotations/labels in Hebrew where appropriate; keep part numbers in English.\n4) Output only schema JSON.",
                quality: "- Avoid misleading realism if details are unknown; label as illustrative.",
            },
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_skill_key_prefixes() {
        assert_eq!(
            Family::from_skill_key("accounting.costModel"),
            Some(Family::Accounting)
        );
        assert_eq!(
            Family::from_skill_key("reconcile.tasksAccounting"),
            Some(Family::ChangeSet)
        );
        assert_eq!(
            Family::from_skill_key("changeset.reviewer"),
            Some(Family::ChangeSet)
        );
        assert_eq!(
            Family::from_skill_key("safety.siteCheck"),
            Some(Family::Logistics)
        );
        assert_eq!(Family::from_skill_key("image.render"), Some(Family::Image));
    }

    #[test]
    fn test_from_skill_key_requires_dot_and_exact_segment() {
        assert_eq!(Family::from_skill_key("accounting"), None);
        assert_eq!(Family::from_skill_key("accountingX.foo"), None);
        assert_eq!(Family::from_skill_key("Accounting.foo"), None);
        assert_eq!(Family::from_skill_key("printing.foo"), None);
        assert_eq!(Family::from_skill_key(""), None);
    }

    #[test]
    fn test_every_family_round_trips_through_its_prefix() {
        for family in Family::ALL {
            let key = format!("{}.anything", family.as_str());
            assert_eq!(Family::from_skill_key(&key), Some(family));
            assert!(!family.spec().goal.is_empty());
        }
    }
}
