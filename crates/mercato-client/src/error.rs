//! # Client Error Types
//!
//! The fixed error taxonomy for backend calls.
//!
//! ## Error Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     HTTP → ClientError Mapping                          │
//! │                                                                         │
//! │  Transport failure (unreachable, timeout) ──► Network                  │
//! │  400 Bad Request ───────────────────────────► Validation               │
//! │  401 / 403 ─────────────────────────────────► Auth                     │
//! │  Any other non-success status ──────────────► Network                  │
//! │  2xx with an unparseable body ──────────────► InvalidResponse          │
//! │                                                                         │
//! │  Every error is caught at the call site that issued the request and    │
//! │  converted into a user-visible message. None propagate silently,       │
//! │  none crash the flow, none are retried automatically.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from backend REST calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend unreachable, timed out, or returned an unexpected
    /// non-success status.
    #[error("network error during {op}: {detail}")]
    Network { op: &'static str, detail: String },

    /// Invalid credentials or a rejected token (401/403).
    #[error("authentication failed during {op}: {detail}")]
    Auth { op: &'static str, detail: String },

    /// The backend rejected the payload (400).
    #[error("request rejected during {op}: {detail}")]
    Validation { op: &'static str, detail: String },

    /// A success response whose body did not have the expected shape.
    #[error("unexpected response during {op}: {detail}")]
    InvalidResponse { op: &'static str, detail: String },
}

impl ClientError {
    pub(crate) fn network(op: &'static str, detail: impl ToString) -> Self {
        ClientError::Network {
            op,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn auth(op: &'static str, detail: impl ToString) -> Self {
        ClientError::Auth {
            op,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn validation(op: &'static str, detail: impl ToString) -> Self {
        ClientError::Validation {
            op,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn invalid_response(op: &'static str, detail: impl ToString) -> Self {
        ClientError::InvalidResponse {
            op,
            detail: detail.to_string(),
        }
    }

    /// Whether re-triggering the same action could reasonably succeed.
    ///
    /// Auth failures need new credentials, not a retry button.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ClientError::Auth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_operation() {
        let err = ClientError::network("create_sale", "connection refused");
        assert_eq!(
            err.to_string(),
            "network error during create_sale: connection refused"
        );
    }

    #[test]
    fn test_auth_errors_are_not_retryable() {
        assert!(!ClientError::auth("login", "bad credentials").is_retryable());
        assert!(ClientError::network("login", "timeout").is_retryable());
    }
}
