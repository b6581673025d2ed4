//! API Key repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{ApiKeyRecord, ApiKeyValue};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Credential store for issued API keys
///
/// A record written by `create` must be visible to `find_by_key` as soon as
/// `create` returns.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Persist a newly issued key
    async fn create(&self, record: ApiKeyRecord) -> Result<ApiKeyRecord, DomainError>;

    /// Look up a key by its token
    async fn find_by_key(&self, key: &ApiKeyValue) -> Result<Option<ApiKeyRecord>, DomainError>;
}
