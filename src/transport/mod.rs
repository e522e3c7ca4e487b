//! Outbound HTTP plumbing for generation backends.

mod http;

pub use http::{HttpConfig, HttpReply, HttpTransport, TransportError};
