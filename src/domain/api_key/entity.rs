//! API Key entity and related types

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_api_key_value, ApiKeyValidationError, API_KEY_BYTES};
use crate::domain::storage::{StorageEntity, StorageKey};

/// API key token - 64 lowercase hexadecimal characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKeyValue(String);

impl ApiKeyValue {
    /// Create a new ApiKeyValue after validation
    pub fn new(key: impl Into<String>) -> Result<Self, ApiKeyValidationError> {
        let key = key.into();
        validate_api_key_value(&key)?;
        Ok(Self(key))
    }

    /// Hex-encode raw key material, always a well-formed key
    pub fn from_bytes(bytes: &[u8; API_KEY_BYTES]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters, safe to log
    pub fn prefix(&self) -> &str {
        &self.0[..8]
    }
}

impl TryFrom<String> for ApiKeyValue {
    type Error = ApiKeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiKeyValue> for String {
    fn from(key: ApiKeyValue) -> Self {
        key.0
    }
}

impl std::fmt::Display for ApiKeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ApiKeyValue {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageEntity for ApiKeyRecord {
    type Key = ApiKeyValue;

    fn key(&self) -> &Self::Key {
        &self.key
    }
}

/// Persistent credential issued to a named caller
///
/// Records are never updated. Expiry is enforced by comparing against
/// `expires_at` on read; expired records stay in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRecord {
    name: String,
    key: ApiKeyValue,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl ApiKeyRecord {
    /// Create a record issued at `issued_at` and valid for `ttl`
    pub fn new(
        name: impl Into<String>,
        key: ApiKeyValue,
        issued_at: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            name: name.into(),
            key,
            expires_at: issued_at + ttl,
            created_at: issued_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &ApiKeyValue {
        &self.key
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the key has expired at `now` (valid up to and including `expires_at`)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Fixed window rate limit policy applied to every authenticated key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Length of one counting window
    pub window: Duration,
    /// Maximum accepted requests per window
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            max_requests: 100,
        }
    }
}

impl RateLimitConfig {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> ApiKeyValue {
        ApiKeyValue::new("0123456789abcdef".repeat(4)).unwrap()
    }

    #[test]
    fn test_api_key_value_valid() {
        let key = sample_key();
        assert_eq!(key.as_str().len(), 64);
        assert_eq!(key.prefix(), "01234567");
    }

    #[test]
    fn test_api_key_value_from_bytes() {
        let key = ApiKeyValue::from_bytes(&[0xab; API_KEY_BYTES]);

        assert_eq!(key.as_str(), "ab".repeat(API_KEY_BYTES));
        assert_eq!(ApiKeyValue::new(key.as_str()).unwrap(), key);
    }

    #[test]
    fn test_api_key_value_invalid() {
        assert!(ApiKeyValue::new("short").is_err());
        assert!(ApiKeyValue::new("Z".repeat(64)).is_err());
    }

    #[test]
    fn test_api_key_value_serde_validates() {
        let json = format!("\"{}\"", "f".repeat(64));
        let key: ApiKeyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(key.as_str(), "f".repeat(64));

        let bad: Result<ApiKeyValue, _> = serde_json::from_str("\"not-a-key\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_record_expires_after_ttl() {
        let issued_at = Utc::now();
        let record = ApiKeyRecord::new("app", sample_key(), issued_at, chrono::Duration::hours(1));

        assert_eq!(record.created_at(), issued_at);
        assert_eq!(record.expires_at() - issued_at, chrono::Duration::hours(1));
    }

    #[test]
    fn test_record_expiry_boundary_is_inclusive() {
        let issued_at = Utc::now();
        let record = ApiKeyRecord::new("app", sample_key(), issued_at, chrono::Duration::hours(1));
        let expires_at = record.expires_at();

        assert!(!record.is_expired_at(issued_at));
        assert!(!record.is_expired_at(expires_at));
        assert!(record.is_expired_at(expires_at + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ApiKeyRecord::new(
            "app",
            sample_key(),
            Utc::now(),
            chrono::Duration::hours(1),
        );
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("expiresAt").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["key"], sample_key().as_str());
    }

    #[test]
    fn test_storage_key_is_token() {
        let record = ApiKeyRecord::new(
            "app",
            sample_key(),
            Utc::now(),
            chrono::Duration::hours(1),
        );
        assert_eq!(StorageEntity::key(&record).as_str(), sample_key().as_str());
    }

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert_eq!(config.window, Duration::from_secs(900));
        assert_eq!(config.max_requests, 100);
    }
}
