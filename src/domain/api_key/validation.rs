//! API Key validation utilities

use thiserror::Error;

/// Errors that can occur during API key validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("API key name cannot be empty")]
    EmptyName,

    #[error("API key name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("API key must be exactly {expected} characters, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("API key contains invalid character: '{0}'. Only lowercase hexadecimal is allowed")]
    InvalidKeyCharacter(char),
}

/// Number of random bytes behind every issued key
pub const API_KEY_BYTES: usize = 32;

/// Hex-encoded length of an issued key
pub const API_KEY_LENGTH: usize = API_KEY_BYTES * 2;

const MAX_API_KEY_NAME_LENGTH: usize = 255;

/// Validate the label of a credential holder
///
/// Whitespace-only names count as empty.
pub fn validate_api_key_name(name: &str) -> Result<(), ApiKeyValidationError> {
    if name.trim().is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    if name.chars().count() > MAX_API_KEY_NAME_LENGTH {
        return Err(ApiKeyValidationError::NameTooLong(MAX_API_KEY_NAME_LENGTH));
    }

    Ok(())
}

/// Validate the shape of an API key token
///
/// Rules:
/// - Exactly 64 characters
/// - Only `0-9` and `a-f`
pub fn validate_api_key_value(key: &str) -> Result<(), ApiKeyValidationError> {
    if key.len() != API_KEY_LENGTH {
        return Err(ApiKeyValidationError::InvalidKeyLength {
            expected: API_KEY_LENGTH,
            actual: key.len(),
        });
    }

    if let Some(c) = key
        .chars()
        .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(ApiKeyValidationError::InvalidKeyCharacter(c));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_api_key_name("mobile-app").is_ok());
        assert!(validate_api_key_name("Plateforme Montréal").is_ok());
        assert!(validate_api_key_name(&"n".repeat(255)).is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_api_key_name(""), Err(ApiKeyValidationError::EmptyName));
        assert_eq!(validate_api_key_name("   "), Err(ApiKeyValidationError::EmptyName));
    }

    #[test]
    fn test_name_too_long() {
        assert_eq!(
            validate_api_key_name(&"n".repeat(256)),
            Err(ApiKeyValidationError::NameTooLong(255))
        );
    }

    #[test]
    fn test_valid_key() {
        assert!(validate_api_key_value(&"a1".repeat(32)).is_ok());
    }

    #[test]
    fn test_key_wrong_length() {
        assert_eq!(
            validate_api_key_value("abc"),
            Err(ApiKeyValidationError::InvalidKeyLength {
                expected: 64,
                actual: 3
            })
        );
    }

    #[test]
    fn test_key_uppercase_rejected() {
        let key = format!("{}A", "a".repeat(63));
        assert_eq!(
            validate_api_key_value(&key),
            Err(ApiKeyValidationError::InvalidKeyCharacter('A'))
        );
    }

    #[test]
    fn test_key_non_hex_rejected() {
        let key = format!("{}g", "0".repeat(63));
        assert_eq!(
            validate_api_key_value(&key),
            Err(ApiKeyValidationError::InvalidKeyCharacter('g'))
        );
    }
}
