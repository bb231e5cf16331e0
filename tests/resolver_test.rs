//! Properties of prompt resolution: totality, determinism and rule priority.

use skillprompts::resolver::{
    self, classify, manual, Family, Resolver, Rule, Stage, PREAMBLE, PREAMBLE_END_MARKER,
};

const KEYS: &[&str] = &[
    "controller.autonomousPlanner",
    "planning.questionsPack5",
    "printing.questionsPack5",
    "weird.questionsPack5",
    "accounting.quoteDraft",
    "reconcile.bankFeed",
    "safety.siteWalk",
    "vendors.shortlist",
    "nodot",
    "",
    "a.b.c.d",
    "הערכה.תקציב",
];

const STAGES: &[&str] = &[
    "", "cross", "printing", "RETRO", "planning", "unknown", "  trello ",
];

#[test]
fn test_every_input_resolves_to_a_framed_prompt() {
    let resolver = Resolver::default();
    for key in KEYS {
        for stage in STAGES {
            let prompt = resolver.resolve(key, stage);
            assert!(prompt.starts_with("```text\nYou are Studio Agent"), "{key} / {stage}");
            assert!(prompt.ends_with("\n```"), "{key} / {stage}");
            assert!(prompt.contains(PREAMBLE_END_MARKER), "{key} / {stage}");
            assert!(
                prompt.contains(&format!("SKILL\n- skillKey: {}\n", key)),
                "{key} / {stage}"
            );
        }
    }
}

#[test]
fn test_resolution_is_deterministic() {
    for key in KEYS {
        for stage in STAGES {
            assert_eq!(resolver::resolve(key, stage), resolver::resolve(key, stage));
        }
    }
}

#[test]
fn test_curated_pack_beats_generic_pack() {
    let prompt = resolver::resolve("planning.questionsPack5", "planning");
    assert!(prompt.contains("budget tolerance for options."));
    assert_eq!(classify("planning.questionsPack5", "planning"), Rule::Manual);
}

#[test]
fn test_question_packs_share_rules_and_output() {
    for key in [
        "planning.questionsPack5",
        "printing.questionsPack5",
        "weird.questionsPack5",
    ] {
        let prompt = resolver::resolve(key, "cross");
        assert!(prompt.contains("QUESTION PACK RULES\n- Ask EXACTLY 5 questions."));
        assert!(prompt.contains("\nFOCUS\n"));
        assert!(prompt
            .contains("OUTPUT\n- Output exactly 5 question objects using the provided outputSchema."));
        assert!(!prompt.contains("WHEN TO USE"));
    }
}

#[test]
fn test_printing_pack_focus() {
    let prompt = resolver::resolve("printing.questionsPack5", "printing");
    for needle in ["substrate", "size/qty", "finish", "mounting", "file ownership", "proof/test-print"] {
        assert!(prompt.contains(needle), "missing {needle}");
    }
}

#[test]
fn test_unknown_pack_gets_generic_focus() {
    let prompt = resolver::resolve("weird.questionsPack5", "printing");
    assert!(prompt.contains("Ask the 5 highest-impact questions to unblock the next step."));
}

#[test]
fn test_family_ignores_stage() {
    let at_printing = resolver::resolve("accounting.quoteDraft", "printing");
    let at_cross = resolver::resolve("accounting.quoteDraft", "cross");
    assert_eq!(at_printing, at_cross);
    assert!(at_printing.contains("Handle studio accounting/quote artifacts"));
    assert_eq!(
        classify("reconcile.bankFeed", "cross"),
        Rule::Family(Family::ChangeSet)
    );
    assert_eq!(
        classify("safety.siteWalk", "cross"),
        Rule::Family(Family::Logistics)
    );
}

#[test]
fn test_stage_template_for_unfamiliar_key() {
    let prompt = resolver::resolve("vendors.shortlist", "printing");
    assert!(prompt.contains("Advance printing workflow safely"));
    assert_eq!(
        classify("vendors.shortlist", "PRINTING"),
        Rule::Stage(Stage::Printing)
    );

    let planning = resolver::resolve("vendors.shortlist", "planning");
    assert!(planning.contains("- Goal: Advance the planning stage with studio-real decisions"));
}

#[test]
fn test_generic_fallback_headings() {
    let prompt = resolver::resolve("vendors.shortlist", "cross");
    assert_eq!(classify("vendors.shortlist", "cross"), Rule::Generic);
    let mut last = 0;
    for heading in [
        "SKILL\n",
        "- Goal: Execute this skill in a studio-real way",
        "WHEN TO USE\n",
        "WHEN NOT TO USE\n",
        "PROCESS\n",
        "QUALITY GATES\n",
    ] {
        let pos = prompt[last..]
            .find(heading)
            .unwrap_or_else(|| panic!("missing or out of order: {heading:?}"));
        last += pos + heading.len();
    }
}

#[test]
fn test_every_curated_key_is_manual() {
    for key in manual::manual_keys() {
        assert_eq!(classify(key, "cross"), Rule::Manual, "{key}");
        assert!(resolver::resolve(key, "cross").contains(&format!("- skillKey: {}\n", key)));
    }
}

#[test]
fn test_unfenced_resolver() {
    let resolver = Resolver::new(PREAMBLE, false);
    let prompt = resolver.resolve("misc.thing", "cross");
    assert!(prompt.starts_with("You are Studio Agent"));
    assert!(!prompt.contains("```"));
}
