//! API Key domain
//!
//! Issued credentials, their validation rules, the credential store seam and
//! the rate limit policy applied to authenticated keys.

mod entity;
mod repository;
mod validation;

pub use entity::{ApiKeyRecord, ApiKeyValue, RateLimitConfig};
pub use repository::ApiKeyRepository;
pub use validation::{
    validate_api_key_name, validate_api_key_value, ApiKeyValidationError, API_KEY_BYTES,
    API_KEY_LENGTH,
};

#[cfg(test)]
pub use repository::MockApiKeyRepository;
