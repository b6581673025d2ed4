//! Signed request extractor

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::HeaderMap,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::auth::{
    canonical_body, SignatureError, SignedRequest, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use crate::infrastructure::observability::record_auth_rejection;

/// JSON body whose request carried a valid server signature
///
/// The signature is checked against the canonical body before `T` is
/// deserialized, so handlers only ever see verified input.
#[derive(Debug, Clone)]
pub struct SignedJson<T>(pub T);

impl<T> FromRequest<AppState> for SignedJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let method = req.method().as_str().to_owned();
        let path = req.uri().path().to_owned();
        let timestamp = header_value(req.headers(), TIMESTAMP_HEADER);
        let signature = header_value(req.headers(), SIGNATURE_HEADER);

        if timestamp.is_none() || signature.is_none() {
            return Err(reject(SignatureError::MissingCredentials, &method, &path));
        }

        let raw = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(format!("Failed to read request body: {}", e)))?;

        let (canonical, value) = canonical_body(&raw)
            .map_err(|e| ApiError::validation(format!("Invalid JSON syntax: {}", e)))?;

        let signed = SignedRequest {
            method: &method,
            path: &path,
            body: &canonical,
            timestamp: timestamp.as_deref(),
            signature: signature.as_deref(),
        };

        state
            .signature_verifier
            .verify(&signed)
            .map_err(|e| reject(e, &method, &path))?;

        serde_json::from_value(value)
            .map(SignedJson)
            .map_err(|e| ApiError::validation(format!("Invalid JSON data: {}", e)))
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn reject(err: SignatureError, method: &str, path: &str) -> ApiError {
    record_auth_rejection(err.reason());
    warn!(method, path, reason = err.reason(), "Signed request rejected");
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(TIMESTAMP_HEADER, "2026-10-17T12:00:00Z".parse().unwrap());
        headers.insert(SIGNATURE_HEADER, "".parse().unwrap());
        headers.insert("x-other", HeaderValue::from_bytes(&[0xfe]).unwrap());

        assert_eq!(
            header_value(&headers, TIMESTAMP_HEADER).as_deref(),
            Some("2026-10-17T12:00:00Z")
        );
        assert_eq!(header_value(&headers, SIGNATURE_HEADER), None);
        assert_eq!(header_value(&headers, "x-other"), None);
        assert_eq!(header_value(&headers, "x-missing"), None);
    }
}
