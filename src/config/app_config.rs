use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::api_key::RateLimitConfig;
use crate::infrastructure::auth::DEFAULT_MAX_CLOCK_SKEW_SECS;
use crate::infrastructure::api_key::DEFAULT_API_KEY_TTL_SECS;
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

use super::error::ConfigError;

/// Conventional variable holding the signing secret
pub const SERVER_SECRET_VAR: &str = "SERVER_SECRET";

/// Conventional variable holding the database URL
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Longest accepted key lifetime
pub const MAX_API_KEY_TTL_SECS: i64 = 7 * 24 * 3600;

/// Longest accepted clock skew and rate limit window
pub const MAX_WINDOW_SECS: i64 = 24 * 3600;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub url: Option<String>,
    pub max_connections: u32,
    /// Deadline for every store call
    pub timeout_ms: u64,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub server_secret: Option<String>,
    pub max_clock_skew_secs: i64,
    pub api_key_ttl_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub window_secs: u64,
    pub max_requests: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            url: None,
            max_connections: 10,
            timeout_ms: 5000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            server_secret: None,
            max_clock_skew_secs: DEFAULT_MAX_CLOCK_SKEW_SECS,
            api_key_ttl_secs: DEFAULT_API_KEY_TTL_SECS,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "server_secret",
                &self.server_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_clock_skew_secs", &self.max_clock_skew_secs)
            .field("api_key_ttl_secs", &self.api_key_ttl_secs)
            .finish()
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        let defaults = RateLimitConfig::default();
        Self {
            window_secs: defaults.window.as_secs(),
            max_requests: defaults.max_requests,
        }
    }
}

impl AppConfig {
    /// Layered load: defaults file, local overrides, `APP__SECTION__KEY`
    /// variables, then the conventional `SERVER_SECRET` / `DATABASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_env_fallbacks(|name| std::env::var(name).ok());
        Ok(app_config)
    }

    /// Fill values the layered sources left empty from conventional variables
    pub fn apply_env_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.auth.server_secret.as_deref().is_none_or(str::is_empty) {
            self.auth.server_secret = lookup(SERVER_SECRET_VAR);
        }

        if self.storage.url.as_deref().is_none_or(str::is_empty) {
            self.storage.url = lookup(DATABASE_URL_VAR);
        }
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server_secret()?;
        self.storage_config()?;

        if self.rate_limit.window_secs == 0 {
            return Err(ConfigError::invalid("rate_limit.window_secs", "must be positive"));
        }
        if self.rate_limit.window_secs > MAX_WINDOW_SECS as u64 {
            return Err(ConfigError::invalid("rate_limit.window_secs", "must be at most one day"));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::invalid("rate_limit.max_requests", "must be positive"));
        }
        if self.auth.max_clock_skew_secs <= 0 {
            return Err(ConfigError::invalid("auth.max_clock_skew_secs", "must be positive"));
        }
        if self.auth.max_clock_skew_secs > MAX_WINDOW_SECS {
            return Err(ConfigError::invalid("auth.max_clock_skew_secs", "must be at most one day"));
        }
        if self.auth.api_key_ttl_secs <= 0 {
            return Err(ConfigError::invalid("auth.api_key_ttl_secs", "must be positive"));
        }
        if self.auth.api_key_ttl_secs > MAX_API_KEY_TTL_SECS {
            return Err(ConfigError::invalid("auth.api_key_ttl_secs", "must be at most seven days"));
        }
        if self.storage.timeout_ms == 0 {
            return Err(ConfigError::invalid("storage.timeout_ms", "must be positive"));
        }

        Ok(())
    }

    pub fn server_secret(&self) -> Result<&str, ConfigError> {
        self.auth
            .server_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingServerSecret)
    }

    pub fn storage_config(&self) -> Result<StorageConfig, ConfigError> {
        let timeout = Duration::from_millis(self.storage.timeout_ms);

        match StorageType::from_str(&self.storage.backend) {
            Some(StorageType::InMemory) => Ok(StorageConfig::in_memory(timeout)),
            Some(StorageType::Postgres) => {
                let url = self
                    .storage
                    .url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or(ConfigError::MissingDatabaseUrl)?;

                let pg = PostgresConfig::new(url)
                    .with_max_connections(self.storage.max_connections);
                Ok(StorageConfig::postgres(pg, timeout))
            }
            None => Err(ConfigError::UnknownStorageBackend(
                self.storage.backend.clone(),
            )),
        }
    }

    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig::new(
            Duration::from_secs(self.rate_limit.window_secs),
            self.rate_limit.max_requests,
        )
    }

    pub fn api_key_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.auth.api_key_ttl_secs)
    }

    pub fn max_clock_skew(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.auth.max_clock_skew_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.server_secret = Some("s3cret".to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.auth.max_clock_skew_secs, 300);
        assert_eq!(config.auth.api_key_ttl_secs, 3600);
        assert_eq!(config.rate_limit.window_secs, 900);
        assert_eq!(config.rate_limit.max_requests, 100);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let config = AppConfig::default();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingServerSecret)
        ));

        let mut config = AppConfig::default();
        config.auth.server_secret = Some(String::new());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingServerSecret)
        ));
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = valid_config();
        config.storage.backend = "postgres".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDatabaseUrl)
        ));

        config.storage.url = Some("postgres://localhost/places".to_string());
        let storage = config.storage_config().unwrap();
        assert_eq!(storage.storage_type(), StorageType::Postgres);
    }

    #[test]
    fn test_unknown_backend() {
        let mut config = valid_config();
        config.storage.backend = "mongodb".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownStorageBackend(_))
        ));
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        let mut config = valid_config();
        config.rate_limit.max_requests = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.rate_limit.window_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_durations_rejected() {
        let mut config = valid_config();
        config.auth.api_key_ttl_secs = 1_000_000_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "auth.api_key_ttl_secs", .. })
        ));

        let mut config = valid_config();
        config.auth.max_clock_skew_secs = i64::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "auth.max_clock_skew_secs", .. })
        ));

        let mut config = valid_config();
        config.rate_limit.window_secs = u64::MAX;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.auth.api_key_ttl_secs = MAX_API_KEY_TTL_SECS;
        config.auth.max_clock_skew_secs = MAX_WINDOW_SECS;
        config.rate_limit.window_secs = MAX_WINDOW_SECS as u64;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_fallbacks_fill_gaps_only() {
        let lookup = |name: &str| match name {
            SERVER_SECRET_VAR => Some("from-env".to_string()),
            DATABASE_URL_VAR => Some("postgres://env/db".to_string()),
            _ => None,
        };

        let mut config = AppConfig::default();
        config.apply_env_fallbacks(lookup);
        assert_eq!(config.auth.server_secret.as_deref(), Some("from-env"));
        assert_eq!(config.storage.url.as_deref(), Some("postgres://env/db"));

        let mut config = valid_config();
        config.apply_env_fallbacks(lookup);
        assert_eq!(config.auth.server_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_derived_values() {
        let config = valid_config();

        assert_eq!(config.rate_limit_config(), RateLimitConfig::default());
        assert_eq!(config.api_key_ttl(), chrono::Duration::hours(1));
        assert_eq!(config.max_clock_skew(), chrono::Duration::minutes(5));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"host": "127.0.0.1", "port": 8081}, "rate_limit": {"max_requests": 5}}"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 900);
    }
}
