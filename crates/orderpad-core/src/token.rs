//! # Bearer Token Claims
//!
//! Reads the claims out of a compact JWT (`header.payload.signature`).
//!
//! ## What This Module Does NOT Do
//! The signature is never checked. The client only needs to know who is
//! logged in and when the session runs out; the server remains the
//! authority on whether a token is valid.
//!
//! ## Failure Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input                          decode()   is_expired()   identity     │
//! │  ─────────────────────────────  ─────────  ────────────   ──────────   │
//! │  well-formed, exp in future     Some       false          Some         │
//! │  well-formed, exp in past       Some       true           Some         │
//! │  well-formed, no exp            Some       true           Some         │
//! │  wrong segment count            None       true           None         │
//! │  payload not base64url          None       true           None         │
//! │  payload not a JSON object      None       true           None         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here panics or returns an error to the caller; the only side
//! effect is a `debug!` line when a token fails to decode.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::TokenError;
use crate::types::UserInfo;

// =============================================================================
// Claim Names
// =============================================================================

/// Login name of the user.
pub const CLAIM_USER_NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";

/// Full display name of the user.
pub const CLAIM_USER_FULL_NAME: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/givenname";

/// Company (tenant) the user belongs to.
pub const CLAIM_COMPANY_NAME: &str =
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/userdata";

// =============================================================================
// Token Claims
// =============================================================================

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    claims: Map<String, Value>,
}

impl TokenClaims {
    /// Decodes the payload segment, reporting why it failed.
    pub fn try_decode(token: &str) -> Result<Self, TokenError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::SegmentCount(segments.len()));
        }

        // Some issuers leave base64 padding on; the JWT form has none.
        let payload = segments[1].trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| TokenError::Base64(e.to_string()))?;

        match serde_json::from_slice::<Value>(&bytes).map_err(|e| TokenError::Json(e.to_string()))? {
            Value::Object(claims) => Ok(TokenClaims { claims }),
            _ => Err(TokenError::NotAnObject),
        }
    }

    /// Decodes the payload segment; `None` if the token is malformed.
    pub fn decode(token: &str) -> Option<Self> {
        match Self::try_decode(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "Failed to decode bearer token");
                None
            }
        }
    }

    /// Raw claim value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Claim rendered as text. Numbers and booleans are stringified;
    /// null, arrays and objects are treated as absent.
    pub fn get_text(&self, name: &str) -> Option<String> {
        match self.claims.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// `exp` in Unix seconds, if present and numeric.
    pub fn exp(&self) -> Option<f64> {
        self.claims.get("exp").and_then(Value::as_f64)
    }

    /// `iat` in Unix seconds, if present and numeric.
    pub fn iat(&self) -> Option<f64> {
        self.claims.get("iat").and_then(Value::as_f64)
    }

    pub fn iss(&self) -> Option<&str> {
        self.claims.get("iss").and_then(Value::as_str)
    }

    pub fn sub(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    /// Identity fields; each missing claim is `None`.
    pub fn identity(&self) -> UserInfo {
        UserInfo {
            user_name: self.get_text(CLAIM_USER_NAME),
            user_full_name: self.get_text(CLAIM_USER_FULL_NAME),
            company_name: self.get_text(CLAIM_COMPANY_NAME),
        }
    }

    /// Absolute expiry time, if the token carries a numeric `exp`.
    ///
    /// An `exp` beyond the representable range clamps to the nearest end,
    /// so it still agrees with [`is_expired_at`](Self::is_expired_at).
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp()?;
        if exp.is_nan() {
            return None;
        }
        // `as` saturates on overflow
        let millis = (exp * 1000.0).round() as i64;
        Some(DateTime::from_timestamp_millis(millis).unwrap_or(if millis > 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        }))
    }

    /// True when `exp` is missing or strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp() {
            Some(exp) => exp < now.timestamp_millis() as f64 / 1000.0,
            None => true,
        }
    }
}

// =============================================================================
// Free Functions (string in, answer out)
// =============================================================================

/// Decodes a token; `None` if malformed.
pub fn decode(token: &str) -> Option<TokenClaims> {
    TokenClaims::decode(token)
}

/// User identity from a token; `None` only if the token does not decode.
pub fn extract_identity(token: &str) -> Option<UserInfo> {
    decode(token).map(|claims| claims.identity())
}

/// True if the token is malformed, has no `exp`, or `exp` has passed.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

/// [`is_expired`] against an explicit clock reading.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match decode(token) {
        Some(claims) => claims.is_expired_at(now),
        None => true,
    }
}

/// Expiry time; `None` under the same conditions [`is_expired`] fails safe.
pub fn expiration_date(token: &str) -> Option<DateTime<Utc>> {
    decode(token).and_then(|claims| claims.expires_at())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn mint(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_standard_claims() {
        let token = mint(json!({
            "sub": "user-1",
            "iss": "pos-backend",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.sub(), Some("user-1"));
        assert_eq!(claims.iss(), Some("pos-backend"));
        assert_eq!(claims.iat(), Some(1_700_000_000.0));
        assert_eq!(claims.exp(), Some(1_700_003_600.0));
    }

    #[test]
    fn test_signature_is_not_checked() {
        let token = mint(json!({"sub": "user-1"}));
        let (head, _) = token.rsplit_once('.').unwrap();
        let tampered = format!("{}.not-a-real-signature", head);
        assert!(decode(&tampered).is_some());
    }

    #[test]
    fn test_malformed_tokens_decode_to_none() {
        assert!(decode("not.a.jwt").is_none());
        assert!(decode("").is_none());
        assert!(decode("onlyone").is_none());
        assert!(decode("a.b.c.d").is_none());

        // valid base64url, but the payload is an array
        let payload = URL_SAFE_NO_PAD.encode(b"[1,2]");
        assert_eq!(
            TokenClaims::try_decode(&format!("h.{}.s", payload)),
            Err(TokenError::NotAnObject)
        );

        // valid base64url, not JSON
        let payload = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(matches!(
            TokenClaims::try_decode(&format!("h.{}.s", payload)),
            Err(TokenError::Json(_))
        ));
    }

    #[test]
    fn test_segment_count_is_reported() {
        assert_eq!(
            TokenClaims::try_decode("a.b"),
            Err(TokenError::SegmentCount(2))
        );
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(br#"{"sub":"x"}"#);
        assert!(payload.ends_with('='));
        let claims = decode(&format!("h.{}.s", payload)).unwrap();
        assert_eq!(claims.sub(), Some("x"));
    }

    #[test]
    fn test_identity_with_only_user_name() {
        let token = mint(json!({
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name": "alice"
        }));

        let user = extract_identity(&token).unwrap();
        assert_eq!(user.user_name.as_deref(), Some("alice"));
        assert_eq!(user.user_full_name, None);
        assert_eq!(user.company_name, None);
    }

    #[test]
    fn test_identity_all_fields() {
        let token = mint(json!({
            CLAIM_USER_NAME: "alice",
            CLAIM_USER_FULL_NAME: "Alice Smith",
            CLAIM_COMPANY_NAME: "Corner Cafe"
        }));

        let user = extract_identity(&token).unwrap();
        assert_eq!(user.user_name.as_deref(), Some("alice"));
        assert_eq!(user.user_full_name.as_deref(), Some("Alice Smith"));
        assert_eq!(user.company_name.as_deref(), Some("Corner Cafe"));
    }

    #[test]
    fn test_identity_without_claims_is_empty_not_none() {
        let token = mint(json!({"sub": "user-1"}));
        let user = extract_identity(&token).unwrap();
        assert_eq!(user, UserInfo::default());
    }

    #[test]
    fn test_identity_of_garbage_is_none() {
        assert!(extract_identity("not.a.jwt").is_none());
    }

    #[test]
    fn test_numeric_claim_is_stringified() {
        let token = mint(json!({ CLAIM_COMPANY_NAME: 1042 }));
        let user = extract_identity(&token).unwrap();
        assert_eq!(user.company_name.as_deref(), Some("1042"));
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let future = mint(json!({"exp": (now + Duration::hours(1)).timestamp()}));
        let past = mint(json!({"exp": (now - Duration::hours(1)).timestamp()}));
        let no_exp = mint(json!({"sub": "user-1"}));

        assert!(!is_expired(&future));
        assert!(is_expired(&past));
        assert!(is_expired(&no_exp));
        assert!(is_expired("not.a.jwt"));
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let token = mint(json!({"exp": 1_700_000_000}));

        // not strictly before now
        assert!(!is_expired_at(&token, now));
        assert!(is_expired_at(&token, now + Duration::milliseconds(1)));
        assert!(!is_expired_at(&token, now - Duration::seconds(1)));
    }

    #[test]
    fn test_non_numeric_exp_counts_as_missing() {
        let token = mint(json!({"exp": "tomorrow"}));
        assert!(is_expired(&token));
        assert!(expiration_date(&token).is_none());
    }

    #[test]
    fn test_out_of_range_exp_clamps() {
        let far = mint(json!({"exp": 1e20}));
        assert!(!is_expired(&far));
        assert_eq!(expiration_date(&far), Some(DateTime::<Utc>::MAX_UTC));

        let ancient = mint(json!({"exp": -1e20}));
        assert!(is_expired(&ancient));
        assert_eq!(expiration_date(&ancient), Some(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn test_expiration_date() {
        let token = mint(json!({"exp": 1_700_003_600}));
        let expected = Utc.timestamp_opt(1_700_003_600, 0).unwrap();
        assert_eq!(expiration_date(&token), Some(expected));

        assert!(expiration_date("not.a.jwt").is_none());
        assert!(expiration_date(&mint(json!({"sub": "x"}))).is_none());
    }
}
