//! Authentication and authorization rejections

use thiserror::Error;

use crate::domain::api_key::ApiKeyValidationError;
use crate::domain::DomainError;

/// Rejections produced while verifying a signed request
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Request is not signed: x-signature and x-timestamp headers are required")]
    MissingCredentials,

    #[error("Request timestamp is outside the accepted window")]
    Expired,

    #[error("Request signature is invalid")]
    Invalid,
}

/// Rejections produced while issuing a new API key
#[derive(Debug, Error)]
pub enum KeyIssueError {
    #[error("The \"name\" field is required")]
    MissingName,

    #[error("Invalid name: {0}")]
    InvalidName(ApiKeyValidationError),

    #[error("Failed to store the API key")]
    StorageFailure(#[source] DomainError),
}

impl From<ApiKeyValidationError> for KeyIssueError {
    fn from(err: ApiKeyValidationError) -> Self {
        match err {
            ApiKeyValidationError::EmptyName => Self::MissingName,
            other => Self::InvalidName(other),
        }
    }
}

/// Rejections produced while authenticating an API key
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("API key required")]
    Missing,

    #[error("Invalid API key")]
    NotFound,

    #[error("API key has expired")]
    Expired,

    #[error("Failed to validate the API key")]
    StorageFailure(#[source] DomainError),
}

impl AuthenticationError {
    /// Short label used in logs and metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::StorageFailure(_) => "storage_failure",
        }
    }
}

impl SignatureError {
    /// Short label used in logs and metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_signature",
            Self::Expired => "request_expired",
            Self::Invalid => "invalid_signature",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_maps_to_missing_name() {
        let err: KeyIssueError = ApiKeyValidationError::EmptyName.into();
        assert!(matches!(err, KeyIssueError::MissingName));

        let err: KeyIssueError = ApiKeyValidationError::NameTooLong(255).into();
        assert!(matches!(err, KeyIssueError::InvalidName(_)));
    }

    #[test]
    fn test_storage_failure_hides_detail() {
        let err = AuthenticationError::StorageFailure(DomainError::storage(
            "connection refused on 10.0.0.12:5432",
        ));

        assert_eq!(err.to_string(), "Failed to validate the API key");
        assert_eq!(err.reason(), "storage_failure");
    }

    #[test]
    fn test_reasons() {
        assert_eq!(SignatureError::Expired.reason(), "request_expired");
        assert_eq!(AuthenticationError::NotFound.reason(), "not_found");
    }
}
