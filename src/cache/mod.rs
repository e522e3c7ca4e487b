//! 响应缓存模块：以命名空间和过期时间包装外部键值存储。
//!
//! # Response Caching Module
//!
//! Generated text is cached as an opaque string under
//! `"<namespace>:<key>"` with an expiry (24 hours by default).
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheGateway`] | Namespacing, TTL, statistics; swallows store failures |
//! | [`CacheStore`] | Trait for the external key/value store |
//! | [`MemoryCache`] | In-process LRU store |
//! | [`RedisRestStore`] | Redis over the Upstash REST protocol |
//! | [`NullCache`] | No-op store |
//! | [`CacheKeyGenerator`] | Optional SHA-256 keys derived from prompt text |
//!
//! ## Example
//!
//! ```rust
//! use ai_hub::cache::{CacheConfig, CacheGateway, MemoryCache};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let gateway = CacheGateway::new(CacheConfig::default(), Arc::new(MemoryCache::new(1000)));
//! gateway.store("greeting", "hello", Duration::from_secs(60)).await;
//! assert_eq!(gateway.lookup("greeting").await.as_deref(), Some("hello"));
//! # }
//! ```
//!
//! Concurrent misses on the same key are not coordinated: each caller
//! computes and writes its own result.

mod backend;
mod gateway;
mod key;
mod redis_rest;

pub use backend::{CacheStore, MemoryCache, NullCache};
pub use gateway::{CacheConfig, CacheGateway, CacheStats, DEFAULT_NAMESPACE, DEFAULT_TTL_SECS};
pub use key::CacheKeyGenerator;
pub use redis_rest::{RedisRestConfig, RedisRestStore};
