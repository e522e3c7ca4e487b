//! Catalog storage: immutable snapshots published through `ArcSwap`.

use arc_swap::ArcSwap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::model::ModelDescriptor;
use crate::{Error, ErrorContext, Result};

/// Point-in-time view of the catalog.
///
/// Selection always runs against a snapshot, so a concurrent availability
/// update never changes the candidate set halfway through a selection.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    entries: Vec<ModelDescriptor>,
    default_index: usize,
}

impl CatalogSnapshot {
    /// Build a snapshot. Entries keep their insertion order.
    pub fn new(entries: Vec<ModelDescriptor>, default_id: &str) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::configuration_with_context(
                "catalog must contain at least one model",
                ErrorContext::new().with_source("catalog"),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.id.as_str()) {
                return Err(Error::configuration_with_context(
                    format!("duplicate model id '{}'", entry.id),
                    ErrorContext::new().with_source("catalog"),
                ));
            }
        }

        let default_index = entries
            .iter()
            .position(|m| m.id == default_id)
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!("default model '{}' is not in the catalog", default_id),
                    ErrorContext::new()
                        .with_field_path("catalog.default")
                        .with_source("catalog"),
                )
            })?;

        Ok(Self {
            entries,
            default_index,
        })
    }

    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// All entries in insertion order, or only those supporting `capability`.
    pub fn list_by_capability(&self, capability: Option<&str>) -> Vec<&ModelDescriptor> {
        match capability {
            Some(cap) => self.entries.iter().filter(|m| m.supports(cap)).collect(),
            None => self.entries.iter().collect(),
        }
    }

    pub fn entries(&self) -> &[ModelDescriptor] {
        &self.entries
    }

    /// The designated entry returned when nothing matches a selection.
    pub fn default_model(&self) -> &ModelDescriptor {
        &self.entries[self.default_index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set_availability(&mut self, id: &str, available: bool) -> bool {
        match self.entries.iter_mut().find(|m| m.id == id) {
            Some(entry) => {
                entry.is_available = available;
                true
            }
            None => false,
        }
    }
}

/// Shared, process-wide model catalog.
///
/// Readers load an `Arc<CatalogSnapshot>` without locking; availability
/// updates publish a fresh snapshot with read-copy-update.
pub struct ModelCatalog {
    current: ArcSwap<CatalogSnapshot>,
}

impl ModelCatalog {
    pub fn new(entries: Vec<ModelDescriptor>, default_id: &str) -> Result<Self> {
        Ok(Self::from_snapshot(CatalogSnapshot::new(entries, default_id)?))
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Catalog populated with the built-in model table.
    pub fn builtin() -> Self {
        Self::from_snapshot(super::builtin::builtin_snapshot())
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    pub fn get(&self, id: &str) -> Option<ModelDescriptor> {
        self.current.load().get(id).cloned()
    }

    pub fn list_by_capability(&self, capability: Option<&str>) -> Vec<ModelDescriptor> {
        self.current
            .load()
            .list_by_capability(capability)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Flip a model's availability flag. Returns `false` for unknown ids.
    pub fn set_availability(&self, id: &str, available: bool) -> bool {
        // Ids are never removed, so a miss here stays a miss.
        if self.current.load().get(id).is_none() {
            return false;
        }
        self.current.rcu(|current| {
            let mut next = CatalogSnapshot::clone(current);
            next.set_availability(id, available);
            next
        });
        info!(model = id, available, "model availability updated");
        true
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
