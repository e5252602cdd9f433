//! Cart engine error taxonomy.
//!
//! All failures from the API client are caught at the [`CartStore`] boundary
//! and converted into notifications; nothing here reaches the UI as a panic.
//!
//! [`CartStore`]: crate::store::CartStore

use marula_core::QuantityError;
use thiserror::Error;

/// Errors that can occur while synchronizing the cart with the remote service.
#[derive(Debug, Error)]
pub enum CartError {
    /// HTTP transport failed before any response arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A local invariant rejected the operation before any request was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] QuantityError),

    /// Server rejected the request with a 4xx/5xx status.
    #[error("server rejected request ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Structured message from the response body, if one was provided.
        message: Option<String>,
    },

    /// Operation target does not exist on the server.
    #[error("not found: {}", .message.as_deref().unwrap_or("cart line does not exist"))]
    NotFound {
        /// Structured message from the response body, if one was provided.
        message: Option<String>,
    },

    /// Rate limited by the cart service.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl CartError {
    /// Structured message carried in the server's error response, if any.
    ///
    /// Used by the notification layer, which prefers the server's wording and
    /// falls back to a generic per-operation message.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } | Self::NotFound { message } => message.as_deref(),
            _ => None,
        }
    }
}
