//! Storage-backed API key repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::api_key::{ApiKeyRecord, ApiKeyRepository, ApiKeyValue};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of ApiKeyRepository
#[derive(Debug)]
pub struct StorageApiKeyRepository {
    storage: Arc<dyn Storage<ApiKeyRecord>>,
}

impl StorageApiKeyRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<ApiKeyRecord>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ApiKeyRepository for StorageApiKeyRepository {
    async fn create(&self, record: ApiKeyRecord) -> Result<ApiKeyRecord, DomainError> {
        self.storage.create(record).await
    }

    async fn find_by_key(&self, key: &ApiKeyValue) -> Result<Option<ApiKeyRecord>, DomainError> {
        self.storage.get(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{Duration, Utc};

    fn create_repo() -> StorageApiKeyRepository {
        StorageApiKeyRepository::new(Arc::new(InMemoryStorage::<ApiKeyRecord>::new()))
    }

    fn record(fill: &str) -> ApiKeyRecord {
        ApiKeyRecord::new(
            "ci",
            ApiKeyValue::new(fill.repeat(64)).unwrap(),
            Utc::now(),
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = create_repo();
        let created = repo.create(record("a")).await.unwrap();

        let found = repo.find_by_key(created.key()).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_unknown_key() {
        let repo = create_repo();
        repo.create(record("a")).await.unwrap();

        let missing = ApiKeyValue::new("b".repeat(64)).unwrap();
        assert!(repo.find_by_key(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_key_conflicts() {
        let repo = create_repo();
        repo.create(record("c")).await.unwrap();

        let result = repo.create(record("c")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let storage = MockStorage::<ApiKeyRecord>::new().with_error("pool exhausted");
        let repo = StorageApiKeyRepository::new(Arc::new(storage));

        let key = ApiKeyValue::new("d".repeat(64)).unwrap();
        assert!(repo.find_by_key(&key).await.is_err());
    }
}
