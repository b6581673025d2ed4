//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod postgres;
mod timeout;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::{connect_pool, PostgresConfig, PostgresStorage};
pub use timeout::TimeoutStorage;
