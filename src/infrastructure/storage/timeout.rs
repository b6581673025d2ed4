//! Deadline decorator for storage backends

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

/// Wraps a storage so that no call outlives `timeout`
///
/// An elapsed call becomes `DomainError::Timeout`; the inner future is dropped.
#[derive(Debug)]
pub struct TimeoutStorage<E>
where
    E: StorageEntity + 'static,
{
    inner: Arc<dyn Storage<E>>,
    timeout: Duration,
}

impl<E> TimeoutStorage<E>
where
    E: StorageEntity + 'static,
{
    pub fn new(inner: Arc<dyn Storage<E>>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>> + Send,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let elapsed_ms = self.timeout.as_millis() as u64;
                warn!(operation, elapsed_ms, "Storage call timed out");
                Err(DomainError::timeout(operation, elapsed_ms))
            }
        }
    }
}

#[async_trait]
impl<E> Storage<E> for TimeoutStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        self.bounded("get", self.inner.get(key)).await
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        self.bounded("list", self.inner.list()).await
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        self.bounded("create", self.inner.create(entity)).await
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        self.bounded("exists", self.inner.exists(key)).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.bounded("count", self.inner.count()).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.bounded("ping", self.inner.ping()).await
    }
}
