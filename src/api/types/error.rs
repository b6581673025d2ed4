//! HTTP error types

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::auth::{AuthenticationError, KeyIssueError, SignatureError};
use crate::domain::{DomainError, PlaceValidationError};

/// Machine readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    MissingSignature,
    RequestExpired,
    InvalidSignature,
    MissingName,
    ValidationError,
    MissingApiKey,
    InvalidApiKey,
    ApiKeyExpired,
    RateLimited,
    StorageFailure,
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::MissingSignature => "missing_signature",
            Self::RequestExpired => "request_expired",
            Self::InvalidSignature => "invalid_signature",
            Self::MissingName => "missing_name",
            Self::ValidationError => "validation_error",
            Self::MissingApiKey => "missing_api_key",
            Self::InvalidApiKey => "invalid_api_key",
            Self::ApiKeyExpired => "api_key_expired",
            Self::RateLimited => "rate_limited",
            Self::StorageFailure => "storage_failure",
        };
        write!(f, "{}", code)
    }
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub code: ApiErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
    /// Seconds to advertise in `retry-after`
    pub retry_after: Option<u64>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
                code,
                details: None,
            },
            retry_after: None,
        }
    }

    /// Attach diagnostic detail to the body
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.response.details = Some(details.into());
        self
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Malformed request body
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorCode::ValidationError, message)
    }

    /// Rate limit error
    pub fn rate_limited(retry_after: u64) -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            ApiErrorCode::RateLimited,
            "Too many requests, please try again later",
        )
        .with_retry_after(retry_after)
    }

    /// Store unavailable or failing; the cause is logged, never returned
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorCode::StorageFailure,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.response)).into_response();

        if let Some(seconds) = self.retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }

        response
    }
}

impl From<DomainError> for ApiError {
    /// Domain errors that reach a handler come from the store
    fn from(err: DomainError) -> Self {
        error!(error = %err, "Storage failure");
        Self::storage_failure("Storage failure")
    }
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        let (status, code) = match err {
            SignatureError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, ApiErrorCode::MissingSignature)
            }
            SignatureError::Expired => (StatusCode::FORBIDDEN, ApiErrorCode::RequestExpired),
            SignatureError::Invalid => (StatusCode::FORBIDDEN, ApiErrorCode::InvalidSignature),
        };

        Self::new(status, code, err.to_string())
    }
}

impl From<KeyIssueError> for ApiError {
    fn from(err: KeyIssueError) -> Self {
        match err {
            KeyIssueError::MissingName => Self::new(
                StatusCode::BAD_REQUEST,
                ApiErrorCode::MissingName,
                err.to_string(),
            ),
            KeyIssueError::InvalidName(_) => Self::validation(err.to_string()),
            KeyIssueError::StorageFailure(ref source) => {
                error!(error = %source, "Key issuance failed");
                Self::storage_failure(err.to_string())
            }
        }
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::Missing => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiErrorCode::MissingApiKey,
                err.to_string(),
            ),
            AuthenticationError::NotFound => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiErrorCode::InvalidApiKey,
                err.to_string(),
            ),
            AuthenticationError::Expired => Self::new(
                StatusCode::FORBIDDEN,
                ApiErrorCode::ApiKeyExpired,
                err.to_string(),
            ),
            AuthenticationError::StorageFailure(ref source) => {
                error!(error = %source, "API key lookup failed");
                Self::storage_failure(err.to_string())
            }
        }
    }
}

impl From<PlaceValidationError> for ApiError {
    fn from(err: PlaceValidationError) -> Self {
        Self::validation(err.to_string())
    }
}
