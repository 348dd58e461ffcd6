//! # Error Types
//!
//! Domain-specific error types for orderpad-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderpad-core errors (this file)                                      │
//! │  ├── CoreError        - Umbrella for the variants below                │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  ├── EnvelopeError    - List response in an unknown wrapper            │
//! │  └── TokenError       - Why a bearer token could not be decoded        │
//! │                                                                         │
//! │  orderpad-client errors (separate crate)                               │
//! │  └── ClientError      - Config, transport, HTTP status, session        │
//! │                                                                         │
//! │  Flow: ValidationError/EnvelopeError/TokenError → ClientError → UI     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `TokenError` never escapes the public decode helpers in [`crate::token`];
//! those degrade to `None`/expired. It exists for callers that want the
//! reason, such as login rejecting a bad token from the server.

use thiserror::Error;

use crate::envelope::EnvelopeShape;

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A list response could not be unwrapped.
    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// A bearer token could not be decoded.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any request goes out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Field was supplied where it has no meaning.
    #[error("{field} does not apply to {context}")]
    NotApplicable { field: String, context: String },
}

// =============================================================================
// Envelope Error
// =============================================================================

/// A list response that matched none of the known wrappers, or matched one
/// but carried a bad element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Not a bare array, and no `data`/`items` array field.
    #[error("Unrecognized list response shape: {found}")]
    UnrecognizedShape { found: String },

    /// The wrapper was recognized, one element failed to deserialize.
    #[error("Invalid item at index {index} in {shape}: {reason}")]
    InvalidItem {
        shape: EnvelopeShape,
        index: usize,
        reason: String,
    },
}

// =============================================================================
// Token Error
// =============================================================================

/// Reasons a compact bearer token could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token must have 3 segments, found {0}")]
    SegmentCount(usize),

    #[error("Token payload is not valid base64url: {0}")]
    Base64(String),

    #[error("Token payload is not valid JSON: {0}")]
    Json(String),

    #[error("Token payload is not a JSON object")]
    NotAnObject,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "user_name".to_string(),
        };
        assert_eq!(err.to_string(), "user_name is required");

        let err = ValidationError::NotApplicable {
            field: "area".to_string(),
            context: "take_away orders".to_string(),
        };
        assert_eq!(err.to_string(), "area does not apply to take_away orders");
    }

    #[test]
    fn test_envelope_error_message_names_shape() {
        let err = EnvelopeError::InvalidItem {
            shape: EnvelopeShape::Items,
            index: 2,
            reason: "missing field `name`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid item at index 2 in `items` envelope: missing field `name`"
        );
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = TokenError::NotAnObject.into();
        assert!(matches!(core_err, CoreError::Token(_)));

        let core_err: CoreError = ValidationError::Required {
            field: "password".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
