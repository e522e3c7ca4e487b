//! Selection properties over the built-in catalog and small custom catalogs.

use ai_hub::catalog::{builtin_models, CatalogSnapshot, ModelCatalog, DEFAULT_MODEL_ID};
use ai_hub::routing::filter_candidates;
use ai_hub::{select_model, FallbackStrategy, ModelDescriptor, Provider, SelectionPreferences};

const STRATEGIES: [FallbackStrategy; 3] = [
    FallbackStrategy::Cost,
    FallbackStrategy::Context,
    FallbackStrategy::Availability,
];

/// A spread of preference sets, including unsatisfiable bounds.
fn preference_grid(capability: &str) -> Vec<SelectionPreferences> {
    let mut grid = Vec::new();
    let providers: [&[Provider]; 4] = [
        &[],
        &[Provider::Xai],
        &[Provider::Vertex],
        &[Provider::Openai, Provider::Cohere],
    ];
    for strategy in STRATEGIES {
        for preferred in providers {
            for max_cost in [None, Some(0.0), Some(0.0005), Some(1.0)] {
                for min_ctx in [None, Some(10_000), Some(1_000_000)] {
                    let mut prefs = SelectionPreferences::new(capability)
                        .with_strategy(strategy)
                        .with_preferred_providers(preferred.iter().copied());
                    prefs.max_cost_per_1k_tokens = max_cost;
                    prefs.min_context_window = min_ctx;
                    grid.push(prefs);
                }
            }
        }
    }
    grid
}

#[test]
fn test_cost_vs_context_two_model_catalog() {
    let snap = CatalogSnapshot::new(
        vec![
            ModelDescriptor::new("groq/x", Provider::Groq, "x")
                .with_capabilities(["chat"])
                .with_cost_per_1k_tokens(0.001)
                .with_context_window(4096),
            ModelDescriptor::new("xai/y", Provider::Xai, "y")
                .with_capabilities(["chat"])
                .with_cost_per_1k_tokens(0.002)
                .with_context_window(16000),
        ],
        "groq/x",
    )
    .unwrap();

    let cost = SelectionPreferences::new("chat").with_strategy(FallbackStrategy::Cost);
    assert_eq!(select_model(&snap, &cost).id, "groq/x");

    let context = SelectionPreferences::new("chat").with_strategy(FallbackStrategy::Context);
    assert_eq!(select_model(&snap, &context).id, "xai/y");
}

#[test]
fn test_unmatched_capability_always_yields_default() {
    let snap = ModelCatalog::builtin().snapshot();
    for prefs in preference_grid("speech") {
        assert_eq!(select_model(&snap, &prefs).id, DEFAULT_MODEL_ID, "{prefs:?}");
    }
}

#[test]
fn test_matched_capability_is_always_honoured() {
    let snap = ModelCatalog::builtin().snapshot();
    for cap in ["chat", "code", "vision", "embeddings", "text-generation"] {
        for prefs in preference_grid(cap) {
            let chosen = select_model(&snap, &prefs);
            assert!(chosen.supports(cap), "{} lacks {cap} for {prefs:?}", chosen.id);
        }
    }
}

#[test]
fn test_strategy_picks_extreme_of_final_candidates() {
    let catalog = ModelCatalog::builtin();
    // Make availability less uniform so the grid exercises more shapes.
    catalog.set_availability("mistral/mistral-large", true);
    let snap = catalog.snapshot();

    for cap in ["chat", "code", "vision"] {
        for prefs in preference_grid(cap) {
            let candidates = filter_candidates(&snap, &prefs);
            let chosen = select_model(&snap, &prefs);
            assert!(candidates.iter().any(|m| m.id == chosen.id));
            match prefs.fallback_strategy {
                FallbackStrategy::Cost => {
                    let min = candidates
                        .iter()
                        .map(|m| m.cost_per_1k_tokens)
                        .fold(f64::INFINITY, f64::min);
                    assert_eq!(chosen.cost_per_1k_tokens, min, "{prefs:?}");
                }
                FallbackStrategy::Context => {
                    let max = candidates.iter().map(|m| m.context_window).max().unwrap();
                    assert_eq!(chosen.context_window, max, "{prefs:?}");
                }
                FallbackStrategy::Availability => {
                    assert_eq!(chosen.id, candidates[0].id, "{prefs:?}");
                }
            }
        }
    }
}

#[test]
fn test_filters_never_empty_a_nonempty_candidate_set() {
    let snap = ModelCatalog::builtin().snapshot();
    for cap in ["chat", "code", "vision", "embeddings"] {
        let by_capability = snap.list_by_capability(Some(cap)).len();
        for prefs in preference_grid(cap) {
            let candidates = filter_candidates(&snap, &prefs);
            assert!(!candidates.is_empty(), "{prefs:?}");
            assert!(candidates.len() <= by_capability);
        }
    }
}

#[test]
fn test_unsatisfiable_filter_leaves_set_unchanged() {
    let snap = ModelCatalog::builtin().snapshot();
    let base = SelectionPreferences::new("chat");
    let baseline: Vec<_> = filter_candidates(&snap, &base)
        .iter()
        .map(|m| m.id.clone())
        .collect();

    for prefs in [
        base.clone().with_max_cost(0.0),
        base.clone().with_min_context_window(10_000_000),
        base.clone().with_preferred_providers([Provider::Vertex]),
    ] {
        let ids: Vec<_> = filter_candidates(&snap, &prefs)
            .iter()
            .map(|m| m.id.clone())
            .collect();
        assert_eq!(ids, baseline, "{prefs:?}");
    }
}

#[test]
fn test_cost_ceiling_is_inclusive() {
    let snap = ModelCatalog::builtin().snapshot();
    let prefs = SelectionPreferences::new("code")
        .with_max_cost(0.0005)
        .with_strategy(FallbackStrategy::Availability);
    let ids: Vec<_> = filter_candidates(&snap, &prefs).iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["xai/grok-1"]);
}

#[test]
fn test_context_floor_is_inclusive() {
    let snap = ModelCatalog::builtin().snapshot();
    let prefs = SelectionPreferences::new("chat").with_min_context_window(128_000);
    let mut ids: Vec<_> = filter_candidates(&snap, &prefs).iter().map(|m| m.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["anthropic/claude-3-opus", "cohere/command-r", "openai/gpt-4o"]);
}

#[test]
fn test_builtin_models_listing_matches_catalog() {
    let catalog = ModelCatalog::builtin();
    let listed: Vec<_> = catalog.list_by_capability(None).into_iter().map(|m| m.id).collect();
    let table: Vec<_> = builtin_models().into_iter().map(|m| m.id).collect();
    assert_eq!(listed, table);
}
