//! Storage factory for runtime storage selection

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{connect_pool, PostgresConfig, PostgresStorage};
use super::timeout::TimeoutStorage;

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage backend plus the deadline applied to every call
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory { timeout: Duration },
    Postgres { config: PostgresConfig, timeout: Duration },
}

impl StorageConfig {
    pub fn in_memory(timeout: Duration) -> Self {
        Self::InMemory { timeout }
    }

    pub fn postgres(config: PostgresConfig, timeout: Duration) -> Self {
        Self::Postgres { config, timeout }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory { .. } => StorageType::InMemory,
            Self::Postgres { .. } => StorageType::Postgres,
        }
    }

    pub fn timeout(&self) -> Duration {
        match self {
            Self::InMemory { timeout } | Self::Postgres { timeout, .. } => *timeout,
        }
    }
}

/// Connection shared by every table created from one factory
#[derive(Debug, Clone)]
enum Backend {
    InMemory,
    Postgres(PgPool),
}

/// Factory for creating storage instances
///
/// One factory is built at process start; every table it hands out shares
/// the same connection pool.
#[derive(Debug, Clone)]
pub struct StorageFactory {
    backend: Backend,
    timeout: Duration,
}

impl StorageFactory {
    /// Open the configured backend
    pub async fn connect(config: &StorageConfig) -> Result<Self, DomainError> {
        let backend = match config {
            StorageConfig::InMemory { .. } => Backend::InMemory,
            StorageConfig::Postgres { config, .. } => Backend::Postgres(connect_pool(config).await?),
        };

        Ok(Self {
            backend,
            timeout: config.timeout(),
        })
    }

    /// Creates a deadline-bounded storage for one entity type
    pub async fn create<E>(&self, table_name: &str) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        let inner: Arc<dyn Storage<E>> = match &self.backend {
            Backend::InMemory => Arc::new(InMemoryStorage::<E>::new()),
            Backend::Postgres(pool) => {
                let storage = PostgresStorage::<E>::new(pool.clone(), table_name)?;
                storage.ensure_table().await?;
                Arc::new(storage)
            }
        };

        Ok(Arc::new(TimeoutStorage::new(inner, self.timeout)))
    }
}
