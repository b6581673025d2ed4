//! API key authentication and rate limiting middleware

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::api_key::ApiKeyRecord;
use crate::domain::auth::AuthenticationError;
use crate::infrastructure::api_key::RateLimitResult;
use crate::infrastructure::observability::{record_auth_rejection, record_rate_limit_rejection};

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "x-api-key";

static RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
static RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
static RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Extractor for the key authenticated by [`api_key_middleware`]
#[derive(Debug, Clone)]
pub struct RequireApiKey(pub ApiKeyRecord);

impl<S> FromRequestParts<S> for RequireApiKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequireApiKey>()
            .cloned()
            .ok_or_else(|| AuthenticationError::Missing.into())
    }
}

/// Authenticate the `x-api-key` header, then charge the key's rate limit
///
/// Requests without a key are rejected here and never reach the limiter.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = extract_api_key(request.headers())?.map(str::to_owned);
    let record = state
        .api_key_service
        .authenticate(header.as_deref())
        .await?;

    let limit = state.rate_limiter.check(record.key().as_str()).await;

    if !limit.allowed {
        record_rate_limit_rejection();
        warn!(
            key_prefix = %record.key().prefix(),
            count = limit.count,
            limit = limit.limit,
            "Rate limit exceeded"
        );

        let mut response = ApiError::rate_limited(limit.reset_in_seconds).into_response();
        apply_rate_limit_headers(response.headers_mut(), &limit);
        return Ok(response);
    }

    debug!(
        key_prefix = %record.key().prefix(),
        remaining = limit.remaining,
        "API key accepted"
    );

    request.extensions_mut().insert(RequireApiKey(record));

    let mut response = next.run(request).await;
    apply_rate_limit_headers(response.headers_mut(), &limit);
    Ok(response)
}

/// First `x-api-key` value, if any
fn extract_api_key(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
    match headers.get(API_KEY_HEADER) {
        None => Ok(None),
        Some(value) => value.to_str().map(|v| Some(v.trim())).map_err(|_| {
            record_auth_rejection(AuthenticationError::NotFound.reason());
            AuthenticationError::NotFound.into()
        }),
    }
}

fn apply_rate_limit_headers(headers: &mut HeaderMap, limit: &RateLimitResult) {
    headers.insert(RATE_LIMIT_LIMIT.clone(), HeaderValue::from(limit.limit));
    headers.insert(RATE_LIMIT_REMAINING.clone(), HeaderValue::from(limit.remaining));
    headers.insert(RATE_LIMIT_RESET.clone(), HeaderValue::from(limit.reset_in_seconds));
}
