//! Configuration errors

use thiserror::Error;

/// Errors raised while loading or validating configuration
///
/// Every variant is fatal: the server refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("auth.server_secret (or SERVER_SECRET) must be set")]
    MissingServerSecret,

    #[error("storage.url (or DATABASE_URL) must be set for the postgres backend")]
    MissingDatabaseUrl,

    #[error("Unknown storage backend '{0}'")]
    UnknownStorageBackend(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidValue { field, reason }
    }
}
