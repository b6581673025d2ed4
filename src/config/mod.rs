//! Configuration module

mod app_config;
mod error;

pub use app_config::{
    AppConfig, AuthConfig, LogFormat, LoggingConfig, RateLimitSettings, ServerConfig,
    StorageSettings, DATABASE_URL_VAR, SERVER_SECRET_VAR,
};
pub use error::ConfigError;
