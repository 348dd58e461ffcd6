//! # Client Error Types
//!
//! Error types for everything that crosses the network or touches disk.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     HTTP Status         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Unauthorized (401)     │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  Forbidden (403)        │ │
//! │  │  ConfigLoad/Save│  │                 │  │  NotFound (404)         │ │
//! │  └─────────────────┘  └─────────────────┘  │  BadRequest (4xx)       │ │
//! │                                            │  Server (5xx)           │ │
//! │  ┌─────────────────┐  ┌─────────────────┐  └─────────────────────────┘ │
//! │  │    Payload      │  │    Session      │                              │
//! │  │                 │  │                 │                              │
//! │  │  Decode         │  │  NotAuthenticated                              │
//! │  │  Envelope       │  │  InvalidToken   │                              │
//! │  │  Validation     │  │                 │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use orderpad_core::{CoreError, EnvelopeError, TokenError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering all failures a screen can see.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Backend URL could not be parsed or has the wrong scheme.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Failed to load the settings file.
    #[error("Failed to load settings: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save the settings file.
    #[error("Failed to save settings: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never got a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The request or the gateway timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    // =========================================================================
    // HTTP Status Errors
    // =========================================================================
    /// 401: the token is missing, expired or revoked.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// 403: the user may not access this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other 4xx.
    #[error("Request rejected ({status}): {message}")]
    BadRequest { status: u16, message: String },

    /// 5xx.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The response body was not the JSON we expected.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// A list response came in an unknown wrapper.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Input rejected before sending.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Session Errors
    // =========================================================================
    /// No usable token in the session.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The backend issued a token we cannot read.
    #[error("Invalid token from server: {0}")]
    InvalidToken(#[from] TokenError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ClientError::Validation(e),
            CoreError::Envelope(e) => ClientError::Envelope(e),
            CoreError::Token(e) => ClientError::InvalidToken(e),
        }
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if repeating the same request may succeed.
    ///
    /// ## Retryable Errors
    /// - Network failures and timeouts
    /// - 5xx responses
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Timeout(_) | ClientError::Server { .. }
        )
    }

    /// Returns true if the user has to log in (again).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized(_)
                | ClientError::NotAuthenticated
                | ClientError::InvalidToken(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// The detail a user should see, without the category prefix.
    ///
    /// `None` when the failure carries no detail, so callers can fall back
    /// to a generic message.
    pub fn message(&self) -> Option<String> {
        let detail = match self {
            ClientError::InvalidConfig(m)
            | ClientError::InvalidUrl(m)
            | ClientError::ConfigLoadFailed(m)
            | ClientError::ConfigSaveFailed(m)
            | ClientError::Network(m)
            | ClientError::Timeout(m)
            | ClientError::Unauthorized(m)
            | ClientError::Forbidden(m)
            | ClientError::NotFound(m)
            | ClientError::Decode(m) => m.clone(),
            ClientError::BadRequest { message, .. } | ClientError::Server { message, .. } => {
                message.clone()
            }
            ClientError::Envelope(e) => e.to_string(),
            ClientError::Validation(e) => e.to_string(),
            ClientError::InvalidToken(e) => e.to_string(),
            ClientError::NotAuthenticated => self.to_string(),
        };

        let detail = detail.trim();
        if detail.is_empty() {
            None
        } else {
            Some(detail.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::Network("connection refused".into()).is_retryable());
        assert!(ClientError::Timeout("timeout".into()).is_retryable());
        assert!(ClientError::Server {
            status: 503,
            message: "maintenance".into()
        }
        .is_retryable());

        assert!(!ClientError::Unauthorized("expired".into()).is_retryable());
        assert!(!ClientError::BadRequest {
            status: 422,
            message: "bad".into()
        }
        .is_retryable());
        assert!(!ClientError::InvalidConfig("bad".into()).is_retryable());
    }

    #[test]
    fn test_auth_errors() {
        assert!(ClientError::Unauthorized(String::new()).is_auth_error());
        assert!(ClientError::NotAuthenticated.is_auth_error());
        assert!(!ClientError::Forbidden("no".into()).is_auth_error());
    }

    #[test]
    fn test_message_strips_category() {
        let err = ClientError::Timeout("timeout".into());
        assert_eq!(err.to_string(), "Request timed out: timeout");
        assert_eq!(err.message().as_deref(), Some("timeout"));

        let err = ClientError::Server {
            status: 500,
            message: "database offline".into(),
        };
        assert_eq!(err.message().as_deref(), Some("database offline"));
    }

    #[test]
    fn test_message_is_none_without_detail() {
        assert_eq!(ClientError::Network(String::new()).message(), None);
        assert_eq!(ClientError::NotFound("   ".into()).message(), None);
    }

    #[test]
    fn test_core_error_conversion() {
        let err: ClientError = CoreError::Token(TokenError::NotAnObject).into();
        assert!(matches!(err, ClientError::InvalidToken(_)));

        let err: ClientError = CoreError::Validation(ValidationError::Required {
            field: "password".into(),
        })
        .into();
        assert_eq!(err.to_string(), "Invalid input: password is required");
    }
}
