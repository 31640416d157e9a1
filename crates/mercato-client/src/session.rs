//! # Session Context
//!
//! Holds the access/refresh token pair for the current cashier session.
//!
//! ## Why An Explicit Object?
//! Tokens never live in ambient global storage reachable from anywhere.
//! The session is an explicit value handed to the
//! [`SalesClient`](crate::SalesClient):
//! whoever holds the session owns the credentials, and dropping it ends
//! them. Tokens are opaque strings - no format is assumed, no expiry is
//! parsed, no refresh is scheduled.
//!
//! ## Thread Safety
//! `Arc<RwLock<_>>` so a cloned client shares the same session: a login on
//! one clone is visible to all.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// The access/refresh credential pair returned by `/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token, attached as a bearer header.
    pub access: String,
    /// Refresh token; kept for the backend's refresh endpoint, unused here.
    pub refresh: String,
}

/// Shared session state for one cashier.
#[derive(Debug, Clone, Default)]
pub struct Session {
    tokens: Arc<RwLock<Option<TokenPair>>>,
}

impl Session {
    /// Creates a new unauthenticated session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Stores a freshly obtained token pair, replacing any previous one.
    pub fn store(&self, tokens: TokenPair) {
        *self.tokens.write().expect("session lock poisoned") = Some(tokens);
    }

    /// The current access token, if logged in.
    pub fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|t| t.access.clone())
    }

    /// The current refresh token, if logged in.
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|t| t.refresh.clone())
    }

    /// Whether a token pair is present.
    pub fn is_authenticated(&self) -> bool {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    /// Discards the stored tokens (logout).
    pub fn clear(&self) {
        *self.tokens.write().expect("session lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access: "acc".to_string(),
            refresh: "ref".to_string(),
        }
    }

    #[test]
    fn test_store_and_read() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), None);

        session.store(pair());
        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("acc"));
        assert_eq!(session.refresh_token().as_deref(), Some("ref"));
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let clone = session.clone();

        session.store(pair());
        assert!(clone.is_authenticated());

        clone.clear();
        assert!(!session.is_authenticated());
    }
}
