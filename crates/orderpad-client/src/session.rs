//! # Session
//!
//! Holds the bearer token for the logged-in user.
//!
//! The token lives in memory only. Every screen shares one `Arc<Session>`;
//! the [`ApiClient`](crate::api::ApiClient) reads it for each request and
//! clears it when the backend answers 401.

use chrono::{DateTime, Utc};
use orderpad_core::{token, TokenClaims, UserInfo};
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    /// Creates an empty (logged-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session holding an existing token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Session {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Replaces the current token.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Current token, if any. Expired tokens are still returned.
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Drops the token.
    pub fn clear(&self) {
        if self.token.write().take().is_some() {
            debug!("Session cleared");
        }
    }

    /// True when a token is held and has not expired.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !token::is_expired(&t))
    }

    /// Identity of the logged-in user, read from the token claims.
    pub fn user_info(&self) -> Option<UserInfo> {
        self.claims().map(|claims| claims.identity())
    }

    /// When the current token expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims().and_then(|claims| claims.expires_at())
    }

    fn claims(&self) -> Option<TokenClaims> {
        self.token().and_then(|t| TokenClaims::decode(&t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mint_token;
    use orderpad_core::token::CLAIM_USER_NAME;
    use serde_json::json;

    #[test]
    fn test_empty_session() {
        let session = Session::new();
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.user_info(), None);
    }

    #[test]
    fn test_set_and_clear() {
        let session = Session::new();
        let token = mint_token(json!({
            CLAIM_USER_NAME: "alice",
            "exp": Utc::now().timestamp() + 3600
        }));

        session.set_token(token.clone());
        assert_eq!(session.token(), Some(token));
        assert!(session.is_authenticated());
        assert_eq!(
            session.user_info().and_then(|u| u.user_name),
            Some("alice".to_string())
        );
        assert!(session.expires_at().is_some());

        session.clear();
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_expired_token_is_not_authenticated() {
        let session = Session::with_token(mint_token(json!({
            "exp": Utc::now().timestamp() - 60
        })));
        assert!(session.token().is_some());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_garbage_token() {
        let session = Session::with_token("not.a.jwt");
        assert!(!session.is_authenticated());
        assert_eq!(session.user_info(), None);
        assert_eq!(session.expires_at(), None);
    }
}
