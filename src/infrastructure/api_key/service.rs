//! API Key service
//!
//! Issues new keys and authenticates presented ones.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::api_key::{validate_api_key_name, ApiKeyRecord, ApiKeyRepository, ApiKeyValue};
use crate::domain::auth::{AuthenticationError, KeyIssueError};
use crate::infrastructure::observability::{record_api_key_issued, record_auth_rejection};

use super::generator::ApiKeyGenerator;

/// Default lifetime of an issued key
pub const DEFAULT_API_KEY_TTL_SECS: i64 = 3600;

/// Result of issuing a new API key
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedApiKey {
    pub name: String,
    /// The full key, returned once to the caller
    pub key: ApiKeyValue,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// API Key service for issuing and authenticating keys
#[derive(Debug)]
pub struct ApiKeyService<R>
where
    R: ApiKeyRepository,
{
    repository: Arc<R>,
    generator: ApiKeyGenerator,
    ttl: Duration,
}

impl<R: ApiKeyRepository> ApiKeyService<R> {
    /// Create a new API key service
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: ApiKeyGenerator::new(),
            ttl: Duration::seconds(DEFAULT_API_KEY_TTL_SECS),
        }
    }

    /// Override the lifetime of issued keys
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a key for `name`, valid from now for the configured lifetime
    pub async fn issue(&self, name: Option<&str>) -> Result<IssuedApiKey, KeyIssueError> {
        self.issue_at(name, Utc::now()).await
    }

    /// Same as [`issue`](Self::issue) with an explicit clock
    pub async fn issue_at(
        &self,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<IssuedApiKey, KeyIssueError> {
        let name = name.ok_or(KeyIssueError::MissingName)?;
        validate_api_key_name(name)?;

        let key = self.generator.generate();
        let record = ApiKeyRecord::new(name, key, now, self.ttl);

        let created = self.repository.create(record).await.map_err(|e| {
            warn!(error = %e, "Failed to persist API key");
            KeyIssueError::StorageFailure(e)
        })?;

        record_api_key_issued();
        info!(
            key_prefix = %created.key().prefix(),
            expires_at = %created.expires_at(),
            "API key issued"
        );

        Ok(IssuedApiKey {
            name: created.name().to_string(),
            key: created.key().clone(),
            issued_at: created.created_at(),
            expires_at: created.expires_at(),
        })
    }

    /// Resolve the value of the `x-api-key` header to a live record
    pub async fn authenticate(
        &self,
        header: Option<&str>,
    ) -> Result<ApiKeyRecord, AuthenticationError> {
        self.authenticate_at(header, Utc::now()).await
    }

    /// Same as [`authenticate`](Self::authenticate) with an explicit clock
    pub async fn authenticate_at(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ApiKeyRecord, AuthenticationError> {
        let result = self.resolve(header, now).await;

        if let Err(ref e) = result {
            record_auth_rejection(e.reason());
        }
        result
    }

    async fn resolve(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ApiKeyRecord, AuthenticationError> {
        let raw = header
            .filter(|h| !h.is_empty())
            .ok_or(AuthenticationError::Missing)?;

        // A malformed token can never match a stored record.
        let key = ApiKeyValue::new(raw).map_err(|_| {
            debug!("Rejected malformed API key");
            AuthenticationError::NotFound
        })?;

        let record = self
            .repository
            .find_by_key(&key)
            .await
            .map_err(|e| {
                warn!(key_prefix = %key.prefix(), error = %e, "API key lookup failed");
                AuthenticationError::StorageFailure(e)
            })?
            .ok_or_else(|| {
                debug!(key_prefix = %key.prefix(), "Unknown API key");
                AuthenticationError::NotFound
            })?;

        if record.is_expired_at(now) {
            debug!(
                key_prefix = %key.prefix(),
                expired_at = %record.expires_at(),
                "Expired API key"
            );
            return Err(AuthenticationError::Expired);
        }

        Ok(record)
    }
}
