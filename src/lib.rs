//! # ai-hub
//!
//! 多厂商文本生成的模型选择与弹性调度引擎。
//!
//! Provider selection and resilient dispatch engine for multi-provider text
//! generation.
//!
//! ## Overview
//!
//! Given a prompt and caller preferences, the hub:
//!
//! - chooses the best backend model from a heterogeneous [`catalog`],
//! - serves previously generated text from a [`cache`] when allowed,
//! - dispatches the request to the chosen backend ([`dispatch`]),
//! - retries once against a designated fallback backend if the primary fails.
//!
//! Selection is advisory: a preference that would rule out every model is
//! ignored rather than producing "no result", so a request always reaches
//! some backend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_hub::{AiHub, FallbackStrategy, GenerationRequest, SelectionPreferences};
//!
//! #[tokio::main]
//! async fn main() -> ai_hub::Result<()> {
//!     let hub = AiHub::builder()
//!         .config(ai_hub::HubConfig::from_env()?)
//!         .build()?;
//!
//!     let prefs = SelectionPreferences::new("chat")
//!         .with_max_cost(0.001)
//!         .with_strategy(FallbackStrategy::Cost);
//!     let result = hub
//!         .generate(&GenerationRequest::new("Hello!", prefs).with_cache_key("hello"))
//!         .await?;
//!     println!("{} via {}", result.text, result.model_used);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Model descriptors, built-in table, availability flags |
//! | [`routing`] | Preference-driven model selection |
//! | [`cache`] | Namespaced response cache and store backends |
//! | [`dispatch`] | Single-attempt chat-completion calls |
//! | [`hub`] | Orchestrator: cache, select, dispatch, fallback |
//! | [`config`] | YAML / environment configuration |
//! | [`transport`] | HTTP client plumbing |
//! | [`types`] | Chat message types |

pub mod cache;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod hub;
pub mod routing;
pub mod transport;
pub mod types;

pub use cache::{CacheConfig, CacheGateway, CacheStore};
pub use catalog::{ModelCatalog, ModelDescriptor, Provider};
pub use config::{HubConfig, ProviderEndpoint};
pub use dispatch::{DispatchError, DispatchTarget, Dispatcher};
pub use hub::{AiHub, AiHubBuilder, GenerationRequest, GenerationResult};
pub use routing::{select_model, FallbackStrategy, SelectionPreferences};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
