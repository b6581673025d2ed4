//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic storage trait for append-only entity collections
///
/// Records handled by this service are immutable once written, so the trait
/// only exposes creation and reads.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities in insertion order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new entity, returns a conflict error if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }

    /// Verifies the backend is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::domain::storage::StorageKey;

    /// Scripted storage for exercising failure paths
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<Vec<E>>,
        error: Mutex<Option<String>>,
        delay: Option<Duration>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(Vec::new()),
                error: Mutex::new(None),
                delay: None,
            }
        }

        pub fn with_entity(self, entity: E) -> Self {
            self.entities.lock().unwrap().push(entity);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// Every call sleeps for `delay` before answering
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        async fn before_call(&self) -> Result<(), DomainError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
            self.before_call().await?;
            Ok(self
                .entities
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.key().as_str() == key.as_str())
                .cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.before_call().await?;
            Ok(self.entities.lock().unwrap().clone())
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.before_call().await?;
            let mut entities = self.entities.lock().unwrap();

            if entities
                .iter()
                .any(|e| e.key().as_str() == entity.key().as_str())
            {
                return Err(DomainError::conflict(
                    "Entity with the same key already exists",
                ));
            }

            entities.push(entity.clone());
            Ok(entity)
        }

        async fn ping(&self) -> Result<(), DomainError> {
            self.before_call().await
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        struct Label(String);

        impl StorageKey for Label {
            fn as_str(&self) -> &str {
                &self.0
            }
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct Marker {
            label: Label,
            weight: u32,
        }

        impl StorageEntity for Marker {
            type Key = Label;

            fn key(&self) -> &Self::Key {
                &self.label
            }
        }

        fn marker(label: &str, weight: u32) -> Marker {
            Marker {
                label: Label(label.to_string()),
                weight,
            }
        }

        #[tokio::test]
        async fn test_mock_storage_create_then_get() {
            let storage: MockStorage<Marker> = MockStorage::new();
            storage.create(marker("a", 1)).await.unwrap();

            let found = storage.get(&Label("a".to_string())).await.unwrap();
            assert_eq!(found, Some(marker("a", 1)));
        }

        #[tokio::test]
        async fn test_mock_storage_create_conflict() {
            let storage = MockStorage::new().with_entity(marker("a", 1));

            let result = storage.create(marker("a", 2)).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_mock_storage_default_count_and_exists() {
            let storage = MockStorage::new()
                .with_entity(marker("a", 1))
                .with_entity(marker("b", 2));

            assert_eq!(storage.count().await.unwrap(), 2);
            assert!(storage.exists(&Label("b".to_string())).await.unwrap());
            assert!(!storage.exists(&Label("c".to_string())).await.unwrap());
        }

        #[tokio::test]
        async fn test_mock_storage_with_error() {
            let storage: MockStorage<Marker> = MockStorage::new().with_error("disk on fire");

            assert!(storage.list().await.is_err());
            assert!(storage.ping().await.is_err());
        }
    }
}
