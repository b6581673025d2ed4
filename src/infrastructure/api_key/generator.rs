//! API Key generation
//!
//! Generates cryptographically secure API keys as lowercase hex.

use rand::RngCore;

use crate::domain::api_key::{ApiKeyValue, API_KEY_BYTES};

/// Generator for secure API keys
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGenerator;

impl ApiKeyGenerator {
    /// Create a new API key generator
    pub fn new() -> Self {
        Self
    }

    /// Generate a new API key from the thread-local CSPRNG
    pub fn generate(&self) -> ApiKeyValue {
        let mut random_bytes = [0u8; API_KEY_BYTES];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        ApiKeyValue::from_bytes(&random_bytes)
    }
}
