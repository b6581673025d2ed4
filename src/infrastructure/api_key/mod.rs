//! API Key infrastructure implementations
//!
//! This module provides implementations for API key generation,
//! storage, authentication, and rate limiting.

mod generator;
mod rate_limiter;
mod service;
mod storage_repository;

pub use generator::ApiKeyGenerator;
pub use rate_limiter::{RateLimitResult, RateLimiter};
pub use service::{ApiKeyService, IssuedApiKey, DEFAULT_API_KEY_TTL_SECS};
pub use storage_repository::StorageApiKeyRepository;
