//! 模型目录：静态模型描述表与可用性开关。
//!
//! # Model Catalog
//!
//! Registry of backend model descriptors keyed by `<provider>/<modelName>` ids.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ModelDescriptor`] | Immutable metadata for one backend model |
//! | [`CatalogSnapshot`] | Point-in-time, read-only view used by selection |
//! | [`ModelCatalog`] | Shared catalog with atomic availability updates |
//!
//! ```rust
//! use ai_hub::catalog::ModelCatalog;
//!
//! let catalog = ModelCatalog::builtin();
//! assert!(catalog.set_availability("openai/gpt-4o", true));
//! let code_models = catalog.list_by_capability(Some("code"));
//! assert!(code_models.iter().any(|m| m.id == "openai/gpt-4o"));
//! ```

mod builtin;
mod model;
mod registry;

pub use builtin::{builtin_models, DEFAULT_MODEL_ID};
pub use model::{ModelDescriptor, Provider};
pub use registry::{CatalogSnapshot, ModelCatalog};
