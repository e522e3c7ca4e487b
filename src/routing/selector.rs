//! Model selection over a catalog snapshot.

use std::cmp::Ordering;
use tracing::debug;

use super::preferences::{FallbackStrategy, SelectionPreferences};
use crate::catalog::{CatalogSnapshot, ModelDescriptor};

/// Apply `keep` to the candidates unless it would remove all of them.
fn narrow<'a, F>(candidates: Vec<&'a ModelDescriptor>, keep: F) -> Vec<&'a ModelDescriptor>
where
    F: Fn(&ModelDescriptor) -> bool,
{
    let narrowed: Vec<_> = candidates.iter().copied().filter(|m| keep(m)).collect();
    if narrowed.is_empty() {
        candidates
    } else {
        narrowed
    }
}

/// Candidates left after every advisory filter, before ranking.
pub fn filter_candidates<'a>(
    snapshot: &'a CatalogSnapshot,
    prefs: &SelectionPreferences,
) -> Vec<&'a ModelDescriptor> {
    let mut candidates = snapshot.list_by_capability(Some(prefs.capability.as_str()));

    if !prefs.preferred_providers.is_empty() {
        candidates = narrow(candidates, |m| prefs.preferred_providers.contains(&m.provider));
    }
    if let Some(max_cost) = prefs.max_cost_per_1k_tokens {
        candidates = narrow(candidates, |m| m.cost_per_1k_tokens <= max_cost);
    }
    if let Some(min_ctx) = prefs.min_context_window {
        candidates = narrow(candidates, |m| m.context_window >= min_ctx);
    }
    narrow(candidates, |m| m.is_available)
}

/// Pick exactly one model for `prefs`.
///
/// Filters run in order (capability, preferred providers, cost ceiling,
/// context floor, availability) and each one is dropped if it would empty the
/// candidate set. Survivors are ranked by the fallback strategy. When no entry
/// supports the capability at all, the catalog's default model is returned.
pub fn select_model<'a>(
    snapshot: &'a CatalogSnapshot,
    prefs: &SelectionPreferences,
) -> &'a ModelDescriptor {
    let mut candidates = filter_candidates(snapshot, prefs);

    // Stable sorts: ties keep catalog order.
    match prefs.fallback_strategy {
        FallbackStrategy::Cost => candidates.sort_by(|a, b| {
            a.cost_per_1k_tokens
                .partial_cmp(&b.cost_per_1k_tokens)
                .unwrap_or(Ordering::Equal)
        }),
        FallbackStrategy::Context => {
            candidates.sort_by(|a, b| b.context_window.cmp(&a.context_window))
        }
        FallbackStrategy::Availability => {}
    }

    match candidates.first().copied() {
        Some(model) => {
            debug!(
                model = model.id.as_str(),
                capability = prefs.capability.as_str(),
                strategy = prefs.fallback_strategy.as_str(),
                candidates = candidates.len(),
                "model selected"
            );
            model
        }
        None => {
            let fallback = snapshot.default_model();
            debug!(
                model = fallback.id.as_str(),
                capability = prefs.capability.as_str(),
                "no model supports capability, using default"
            );
            fallback
        }
    }
}
