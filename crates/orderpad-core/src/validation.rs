//! # Validation Module
//!
//! Input checks that run before a request leaves the device.
//!
//! ## Usage
//! ```rust
//! use orderpad_core::validation::validate_credentials;
//!
//! assert!(validate_credentials("alice", "s3cret").is_ok());
//! assert!(validate_credentials("   ", "s3cret").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest user name the login screen accepts.
pub const MAX_USER_NAME_LEN: usize = 100;

/// Validates login credentials.
///
/// ## Rules
/// - User name must not be blank and is at most 100 characters (trimmed)
/// - Password must not be empty (whitespace is significant, so not trimmed)
pub fn validate_credentials(user_name: &str, password: &str) -> ValidationResult<()> {
    let user_name = user_name.trim();

    if user_name.is_empty() {
        return Err(ValidationError::Required {
            field: "user_name".to_string(),
        });
    }

    if user_name.chars().count() > MAX_USER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "user_name".to_string(),
            max: MAX_USER_NAME_LEN,
        });
    }

    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(())
}

/// Validates a server-issued identifier passed back in a request.
pub fn validate_identifier(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("alice", "pw").is_ok());
        assert!(validate_credentials("  alice  ", " ").is_ok());

        assert_eq!(
            validate_credentials("", "pw"),
            Err(ValidationError::Required {
                field: "user_name".to_string()
            })
        );
        assert_eq!(
            validate_credentials("alice", ""),
            Err(ValidationError::Required {
                field: "password".to_string()
            })
        );
    }

    #[test]
    fn test_user_name_length() {
        let long = "a".repeat(MAX_USER_NAME_LEN + 1);
        assert!(matches!(
            validate_credentials(&long, "pw"),
            Err(ValidationError::TooLong { .. })
        ));

        let exact = "a".repeat(MAX_USER_NAME_LEN);
        assert!(validate_credentials(&exact, "pw").is_ok());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("category", "7").is_ok());
        assert!(validate_identifier("category", " ").is_err());
    }
}
