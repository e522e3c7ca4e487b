use crate::catalog::Provider;
use crate::transport::TransportError;

/// A single backend call that did not produce text.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {source}")]
    Network {
        provider: Provider,
        #[source]
        source: TransportError,
    },

    #[error("{provider} returned a malformed response: {detail}")]
    Malformed { provider: Provider, detail: String },

    #[error("no endpoint configured for {provider}")]
    Unconfigured { provider: Provider },
}

impl DispatchError {
    pub fn provider(&self) -> Provider {
        match self {
            DispatchError::Status { provider, .. }
            | DispatchError::Network { provider, .. }
            | DispatchError::Malformed { provider, .. }
            | DispatchError::Unconfigured { provider } => *provider,
        }
    }

    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            DispatchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
