//! Places API
//!
//! Stores geographic points behind two authentication layers:
//! - HMAC-signed requests for issuing API keys
//! - Expiring API keys with a per-key fixed window rate limit
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{ApiKeyRecord, Place};
use infrastructure::{
    api_key::{ApiKeyService, RateLimiter, StorageApiKeyRepository},
    auth::SignatureVerifier,
    place::{PlaceService, StoragePlaceRepository},
    storage::StorageFactory,
};
use tracing::info;

/// Table holding issued API keys
pub const API_KEYS_TABLE: &str = "api_keys";

/// Table holding places
pub const PLACES_TABLE: &str = "places";

/// Create the application state from a validated configuration
///
/// One storage backend is opened here and shared by every service.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage_config()?;
    let factory = StorageFactory::connect(&storage_config).await?;

    info!(
        backend = ?storage_config.storage_type(),
        timeout_ms = storage_config.timeout().as_millis() as u64,
        "Storage backend ready"
    );

    let api_key_storage = factory.create::<ApiKeyRecord>(API_KEYS_TABLE).await?;
    let place_storage = factory.create::<Place>(PLACES_TABLE).await?;

    let api_key_service =
        ApiKeyService::new(Arc::new(StorageApiKeyRepository::new(api_key_storage)))
            .with_ttl(config.api_key_ttl());
    let place_service = PlaceService::new(Arc::new(StoragePlaceRepository::new(place_storage)));

    let signature_verifier =
        SignatureVerifier::new(config.server_secret()?)?.with_max_skew(config.max_clock_skew());

    let rate_limit = config.rate_limit_config();
    info!(
        window_secs = rate_limit.window.as_secs(),
        max_requests = rate_limit.max_requests,
        "Rate limiter configured"
    );

    Ok(AppState::new(
        Arc::new(api_key_service),
        Arc::new(place_service),
        Arc::new(signature_verifier),
        Arc::new(RateLimiter::new(rate_limit)),
    ))
}
