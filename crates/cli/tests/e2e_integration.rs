//! End-to-end tests for the promptsmith selection pipeline.
//!
//! These exercise catalog loading, configuration overrides and the
//! selector together, including the documented selection scenarios and the
//! invariants that must hold for every request.

use std::sync::Arc;

use promptsmith_config::AppConfig;
use promptsmith_core::{
    Catalog, ClassificationResult, Complexity, ComplexityFactors, ComplexityLevel,
    PackingStrategy, SelectionRequest, SelectionResponse, SelectionRules, Technique,
};
use promptsmith_selector::{SelectorHandle, TechniqueSelector};

// ── Fixtures ─────────────────────────────────────────────────────────────

fn rules_with(
    max: usize,
    incompatible: &[&[&str]],
    boosts: &[(&str, &str, i32)],
) -> SelectionRules {
    let mut rules = SelectionRules {
        max_techniques: max,
        incompatible_combinations: incompatible
            .iter()
            .map(|set| set.iter().map(|s| (*s).to_string()).collect())
            .collect(),
        ..SelectionRules::default()
    };
    for (intent, technique, boost) in boosts {
        rules
            .intent_priority_boost
            .entry((*intent).to_string())
            .or_default()
            .insert((*technique).to_string(), *boost);
    }
    rules
}

fn selector(techniques: Vec<Technique>, rules: SelectionRules) -> TechniqueSelector {
    TechniqueSelector::new(Catalog::new(techniques, rules, ComplexityFactors::default()))
        .expect("valid catalog")
}

/// A catalog with overlapping conditions and several exclusion sets.
fn busy_catalog(max: usize, packing: PackingStrategy) -> TechniqueSelector {
    let techniques = vec![
        Technique::new("chain_of_thought", 8)
            .with_intents(["problem_solving", "analysis"])
            .with_complexity([ComplexityLevel::Moderate, ComplexityLevel::Complex]),
        Technique::new("tree_of_thoughts", 7)
            .with_intents(["problem_solving"])
            .with_score_range(0.6, 1.0),
        Technique::new("few_shot", 7)
            .with_complexity([ComplexityLevel::Simple, ComplexityLevel::Moderate])
            .with_keywords(["example", "similar"]),
        Technique::new("step_by_step", 6).with_keywords(["step", "how to"]),
        Technique::new("role_playing", 6).with_intents(["creative_writing"]),
        Technique::new("structured_output", 5).with_keywords(["table", "json", "list"]),
        Technique::new("fallback", 1),
        Technique::new("self_consistency", 6)
            .with_intents(["problem_solving", "calculation"])
            .with_score_range(0.5, 1.0),
    ];
    let mut rules = rules_with(
        max,
        &[
            &["chain_of_thought", "tree_of_thoughts"],
            &["chain_of_thought", "step_by_step"],
            &["tree_of_thoughts", "self_consistency", "few_shot"],
            &["fallback", "structured_output"],
        ],
        &[
            ("problem_solving", "chain_of_thought", 3),
            ("creative_writing", "few_shot", 2),
            ("calculation", "self_consistency", 4),
            ("analysis", "structured_output", -2),
        ],
    );
    rules.packing = packing;
    selector(techniques, rules)
}

fn request_grid() -> Vec<SelectionRequest> {
    let texts = [
        "",
        "hello",
        "Write an example similar to this pattern",
        "Explain step by step how to build a table of results",
        "Calculate 12 * 4 and then 7 + 9? Also why? It must be exact and it must be fast.",
        "Give me a json list of examples, step by step",
    ];
    let intents = [
        None,
        Some("problem_solving"),
        Some("creative_writing"),
        Some("calculation"),
        Some("analysis"),
        Some("unknown_intent_test"),
    ];
    let complexities = [
        Complexity::default(),
        Complexity::level(ComplexityLevel::Simple),
        Complexity::level(ComplexityLevel::Moderate),
        Complexity::level(ComplexityLevel::Complex),
        Complexity::score(0.05),
        Complexity::score(0.75),
    ];

    let mut grid = Vec::new();
    for text in texts {
        for intent in intents {
            for complexity in complexities {
                grid.push(SelectionRequest {
                    text: text.to_string(),
                    intent: intent.map(String::from),
                    complexity,
                });
            }
        }
    }
    grid
}

fn assert_invariants(
    selector: &TechniqueSelector,
    request: &SelectionRequest,
    response: &SelectionResponse,
) {
    let rules = &selector.catalog().selection_rules;
    assert!(
        response.techniques.len() <= rules.max_techniques,
        "too many techniques for {request:?}"
    );
    let ids = response.technique_ids();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert!(!rules.conflicts(a, b), "{a} and {b} co-selected for {request:?}");
        }
    }
    assert!((0.0..=1.0).contains(&response.confidence));
    assert!((0.0..=1.0).contains(&response.complexity_score));
    assert_eq!(response.primary.as_deref(), ids.first().copied());
    assert!(!response.reasoning.is_empty());
    // Ranked order: scores never increase.
    assert!(response.techniques.windows(2).all(|w| w[0].score >= w[1].score));
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[test]
fn scenario_a_problem_solving_prefers_chain_of_thought() {
    let s = selector(
        vec![
            Technique::new("few_shot", 7).with_keywords(["example", "similar"]),
            Technique::new("chain_of_thought", 8)
                .with_intents(["problem_solving", "analysis"])
                .with_complexity([ComplexityLevel::Complex]),
            Technique::new("step_by_step", 6).with_keywords(["step by step"]),
        ],
        rules_with(3, &[], &[("problem_solving", "chain_of_thought", 2)]),
    );
    let response = s.select(
        &SelectionRequest::new("Work through this step by step")
            .with_intent("problem_solving")
            .with_level(ComplexityLevel::Complex),
    );
    assert_eq!(response.primary.as_deref(), Some("chain_of_thought"));
    assert_eq!(response.technique_ids(), vec!["chain_of_thought", "step_by_step"]);
}

#[test]
fn scenario_b_creative_example_prefers_few_shot() {
    let s = selector(
        vec![
            Technique::new("chain_of_thought", 8)
                .with_intents(["problem_solving"])
                .with_complexity([ComplexityLevel::Complex]),
            Technique::new("few_shot", 7)
                .with_complexity([ComplexityLevel::Simple, ComplexityLevel::Moderate])
                .with_keywords(["example", "similar"]),
        ],
        SelectionRules::default(),
    );
    let response = s.select(
        &SelectionRequest::new("Write an example similar to this pattern")
            .with_intent("creative_writing")
            .with_level(ComplexityLevel::Simple),
    );
    assert_eq!(response.primary.as_deref(), Some("few_shot"));
    assert!(response.reasoning.contains("keyword 'example'"));
}

#[test]
fn scenario_c_unknown_intent_yields_empty_success() {
    let s = busy_catalog(3, PackingStrategy::Greedy);
    let mut catalog = s.catalog().clone();
    catalog.techniques.retain(|t| t.id != "fallback");
    let s = TechniqueSelector::new(catalog).unwrap();

    let response = s.select(
        &SelectionRequest::new("nothing relevant here")
            .with_intent("unknown_intent_test")
            .with_level(ComplexityLevel::Moderate),
    );
    assert!(response.techniques.is_empty());
    assert_eq!(response.primary, None);
    assert!(!response.reasoning.is_empty());
    assert!(response.reasoning.contains("No techniques matched"));
}

#[test]
fn scenario_d_incompatible_pair_keeps_higher_ranked() {
    let s = selector(
        vec![Technique::new("b", 5), Technique::new("a", 9)],
        rules_with(3, &[&["a", "b"]], &[]),
    );
    let response = s.select(&SelectionRequest::new("anything"));
    assert_eq!(response.technique_ids(), vec!["a"]);
    assert!(response.reasoning.contains("b (incompatible with a)"));
}

#[test]
fn scenario_e_limit_keeps_top_three_in_order() {
    let techniques = vec![
        Technique::new("t1", 1),
        Technique::new("t4", 4),
        Technique::new("t2", 2),
        Technique::new("t5", 5),
        Technique::new("t3", 3),
    ];
    let s = selector(techniques, rules_with(3, &[], &[]));
    let response = s.select(&SelectionRequest::new("anything"));
    assert_eq!(response.technique_ids(), vec!["t5", "t4", "t3"]);
    let scores: Vec<i64> = response.techniques.iter().map(|t| t.score).collect();
    assert_eq!(scores, vec![5, 4, 3]);
    assert!(response.reasoning.contains("2 more matched technique(s) omitted by the limit of 3"));
}

// ── Built-in catalog ─────────────────────────────────────────────────────

#[test]
fn builtin_catalog_covers_documented_scenarios() {
    let s = TechniqueSelector::builtin().unwrap();

    let a = s.select(
        &SelectionRequest::new("Please solve this step by step")
            .with_intent("problem_solving")
            .with_level(ComplexityLevel::Complex),
    );
    assert_eq!(a.primary.as_deref(), Some("chain_of_thought"));
    assert!(!a.technique_ids().contains(&"tree_of_thoughts"));

    let b = s.select(
        &SelectionRequest::new("Write an example similar to this pattern")
            .with_intent("creative_writing")
            .with_level(ComplexityLevel::Simple),
    );
    assert_eq!(b.primary.as_deref(), Some("few_shot"));

    let c = s.select(
        &SelectionRequest::new("hello there")
            .with_intent("unknown_intent_test")
            .with_level(ComplexityLevel::Simple),
    );
    assert!(c.is_empty());
    assert!(!c.reasoning.is_empty());
}

#[test]
fn classifier_output_feeds_selection() {
    let s = TechniqueSelector::builtin().unwrap();
    let classification = ClassificationResult {
        intent: "learning".into(),
        complexity: Complexity::level(ComplexityLevel::Moderate),
        confidence: 0.88,
    };
    let response = s.select(&SelectionRequest::from_classification(
        "Teach me how to read a balance sheet",
        &classification,
    ));
    assert_eq!(response.primary.as_deref(), Some("step_by_step"));
    assert!(response.technique_ids().contains(&"socratic_questioning"));
}

// ── Properties ───────────────────────────────────────────────────────────

#[test]
fn invariants_hold_across_request_grid() {
    for max in [0, 1, 2, 3, 5] {
        for packing in [PackingStrategy::Greedy, PackingStrategy::Exhaustive] {
            let s = busy_catalog(max, packing);
            for request in request_grid() {
                let response = s.select(&request);
                assert_invariants(&s, &request, &response);
            }
        }
    }
}

#[test]
fn identical_input_gives_byte_identical_output() {
    for packing in [PackingStrategy::Greedy, PackingStrategy::Exhaustive] {
        let first = busy_catalog(3, packing);
        let second = busy_catalog(3, packing);
        for request in request_grid() {
            let a = serde_json::to_string(&first.select(&request)).unwrap();
            let b = serde_json::to_string(&first.select(&request)).unwrap();
            let c = serde_json::to_string(&second.select(&request)).unwrap();
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }
}

#[test]
fn missing_intent_and_complexity_act_as_wildcards() {
    let s = busy_catalog(8, PackingStrategy::Greedy);
    let response = s.select(&SelectionRequest::new("plain words"));
    // Intent- and complexity-gated techniques match; keyword-gated ones do not.
    let ids = response.technique_ids();
    assert!(ids.contains(&"chain_of_thought"));
    assert!(ids.contains(&"role_playing"));
    assert!(!ids.contains(&"few_shot"));
    assert!(!ids.contains(&"step_by_step"));
}

#[test]
fn concurrent_callers_share_one_selector() {
    let s = Arc::new(busy_catalog(3, PackingStrategy::Greedy));
    let grid = Arc::new(request_grid());
    let expected: Vec<_> = grid.iter().map(|r| s.select(r)).collect();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let s = Arc::clone(&s);
            let grid = Arc::clone(&grid);
            std::thread::spawn(move || grid.iter().map(|r| s.select(r)).collect::<Vec<_>>())
        })
        .collect();
    for worker in workers {
        assert_eq!(worker.join().unwrap(), expected);
    }
}

// ── Configuration pipeline ───────────────────────────────────────────────

#[test]
fn config_overrides_flow_into_selection() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.toml");
    std::fs::write(&catalog_path, Catalog::builtin_toml()).unwrap();

    let mut config = AppConfig::default();
    config.catalog.path = Some(catalog_path.display().to_string());
    config.selection.max_techniques = Some(1);
    config.selection.min_confidence = Some(0.0);

    let s = TechniqueSelector::new(config.load_catalog().unwrap()).unwrap();
    let response = s.select(
        &SelectionRequest::new("Write an example similar to this pattern")
            .with_intent("creative_writing")
            .with_level(ComplexityLevel::Simple),
    );
    assert_eq!(response.technique_ids(), vec!["few_shot"]);
    assert!(response.meets_min_confidence);
}

#[test]
fn json_catalog_and_hot_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{
            "techniques": [
                {"id": "few_shot", "priority": 7, "template": "fs",
                 "conditions": {"keywords": ["example"]}}
            ],
            "selectionRules": {"maxTechniques": 2}
        }"#,
    )
    .unwrap();

    let handle = SelectorHandle::from_catalog(Catalog::from_path(&path).unwrap()).unwrap();
    let request = SelectionRequest::new("give an example");
    let before = handle.select(&request);
    assert_eq!(before.techniques[0].template, "fs");

    handle.reload(Catalog::builtin().unwrap()).unwrap();
    let after = handle.select(&request);
    let few_shot = after
        .techniques
        .iter()
        .find(|t| t.id == "few_shot")
        .expect("few_shot selected after reload");
    assert_eq!(few_shot.template, "few_shot_v1");
}
