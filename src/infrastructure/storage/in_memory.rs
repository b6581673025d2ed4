//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

#[derive(Debug)]
struct Entries<E> {
    by_key: HashMap<String, E>,
    order: Vec<String>,
}

/// Thread-safe in-memory storage implementation
///
/// Writes are visible to the next read as soon as `create` returns. Data is
/// lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entries: RwLock<Entries<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries {
                by_key: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.by_key.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries
            .order
            .iter()
            .filter_map(|key| entries.by_key.get(key).cloned())
            .collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if entries.by_key.contains_key(&key) {
            // Keys can be credentials, so they stay out of the message
            return Err(DomainError::conflict(
                "Entity with the same key already exists",
            ));
        }

        entries.order.push(key.clone());
        entries.by_key.insert(key, entity.clone());
        Ok(entity)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.by_key.len())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.by_key.contains_key(key.as_str()))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.entries
            .read()
            .map(|_| ())
            .map_err(|e| DomainError::storage(format!("Storage lock poisoned: {}", e)))
    }
}
