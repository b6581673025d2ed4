//! HMAC request signing and verification

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::domain::auth::{canonical_payload, parse_timestamp, SignatureError, SignedRequest};
use crate::domain::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Default tolerated distance between the signing clock and ours
pub const DEFAULT_MAX_CLOCK_SKEW_SECS: i64 = 300;

/// Signs and verifies requests with the shared server secret
#[derive(Clone)]
pub struct SignatureVerifier {
    mac: HmacSha256,
    max_skew: Duration,
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"[REDACTED]")
            .field("max_skew", &self.max_skew)
            .finish()
    }
}

impl SignatureVerifier {
    /// Create a verifier keyed with `secret`
    pub fn new(secret: &str) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::configuration("Server secret must not be empty"));
        }

        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| DomainError::configuration(format!("Invalid HMAC key: {}", e)))?;

        Ok(Self {
            mac,
            max_skew: Duration::seconds(DEFAULT_MAX_CLOCK_SKEW_SECS),
        })
    }

    pub fn with_max_skew(mut self, max_skew: Duration) -> Self {
        self.max_skew = max_skew;
        self
    }

    pub fn max_skew(&self) -> Duration {
        self.max_skew
    }

    /// Lowercase hex HMAC-SHA256 of `payload`
    pub fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Signature of a request given its canonical parts
    pub fn sign_request(&self, method: &str, path: &str, body: &str, timestamp: &str) -> String {
        self.sign(&canonical_payload(method, path, body, timestamp))
    }

    pub fn verify(&self, request: &SignedRequest<'_>) -> Result<(), SignatureError> {
        self.verify_at(request, Utc::now())
    }

    /// Check headers, freshness, then the signature itself
    pub fn verify_at(
        &self,
        request: &SignedRequest<'_>,
        now: DateTime<Utc>,
    ) -> Result<(), SignatureError> {
        let (Some(timestamp), Some(signature)) = (request.timestamp, request.signature) else {
            return Err(SignatureError::MissingCredentials);
        };

        if timestamp.is_empty() || signature.is_empty() {
            return Err(SignatureError::MissingCredentials);
        }

        let Some(signed_at) = parse_timestamp(timestamp) else {
            debug!(timestamp, "Unparseable request timestamp");
            return Err(SignatureError::Expired);
        };

        // Both instants are compared in whole epoch seconds
        let skew_secs = (now.timestamp() - signed_at.timestamp()).abs();
        if skew_secs > self.max_skew.num_seconds() {
            debug!(%signed_at, %now, "Request timestamp outside accepted window");
            return Err(SignatureError::Expired);
        }

        let expected = self.sign(&request.payload(timestamp));
        if !constant_time_eq(&expected, signature) {
            debug!(method = request.method, path = request.path, "Signature mismatch");
            return Err(SignatureError::Invalid);
        }

        Ok(())
    }
}

/// Constant-time string comparison
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}
