//! 模型选择：根据调用方偏好从目录中挑选唯一的最佳模型。
//!
//! # Model Selection
//!
//! Pure selection logic: no network calls, no shared state. Selection runs
//! against a [`CatalogSnapshot`](crate::catalog::CatalogSnapshot) so callers
//! decide when availability changes become visible.
//!
//! Preferences degrade gracefully. Each filter is advisory and is skipped
//! when it would leave no candidates, so [`select_model`] always returns
//! a model.
//!
//! ```rust
//! use ai_hub::catalog::ModelCatalog;
//! use ai_hub::routing::{select_model, FallbackStrategy, SelectionPreferences};
//!
//! let catalog = ModelCatalog::builtin();
//! let prefs = SelectionPreferences::new("code").with_strategy(FallbackStrategy::Cost);
//! let snapshot = catalog.snapshot();
//! let model = select_model(&snapshot, &prefs);
//! assert_eq!(model.id, "xai/grok-1");
//! ```

mod preferences;
mod selector;

pub use preferences::{FallbackStrategy, SelectionPreferences};
pub use selector::{filter_candidates, select_model};
