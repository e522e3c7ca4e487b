//! 弹性生成编排：缓存查询、模型选择、主调度与单次回退。
//!
//! # Resilient Generation
//!
//! [`AiHub`] composes the catalog, selector, cache gateway and dispatcher:
//!
//! 1. Serve from cache when `use_cache` is set and a key is given.
//! 2. Select the primary model from the catalog snapshot.
//! 3. Dispatch to it; on success write the text to the cache and return.
//! 4. On failure, dispatch once to the designated fallback. Its output is
//!    returned with `used_fallback = true` and is not cached.
//! 5. If the fallback fails too, return [`Error::AllProvidersFailed`](crate::Error::AllProvidersFailed).
//!
//! ```rust,no_run
//! use ai_hub::{AiHub, GenerationRequest, SelectionPreferences};
//!
//! #[tokio::main]
//! async fn main() -> ai_hub::Result<()> {
//!     let hub = AiHub::builder().build()?;
//!     let request = GenerationRequest::new("Summarise this task", SelectionPreferences::new("chat"))
//!         .with_cache_key("task-42-summary");
//!     let result = hub.generate(&request).await?;
//!     println!("{} ({})", result.text, result.model_used);
//!     Ok(())
//! }
//! ```

mod builder;
mod core;
mod request;

pub use builder::AiHubBuilder;
pub use core::AiHub;
pub use request::{GenerationRequest, GenerationResult, CACHED_MODEL_MARKER};
