//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod auth;
pub mod error;
pub mod place;
pub mod storage;

pub use api_key::{
    ApiKeyRecord, ApiKeyRepository, ApiKeyValidationError, ApiKeyValue, RateLimitConfig,
};
pub use auth::{AuthenticationError, KeyIssueError, SignatureError, SignedRequest};
pub use error::DomainError;
pub use place::{NewPlace, Place, PlaceId, PlaceRepository, PlaceValidationError};
pub use storage::{Storage, StorageEntity, StorageKey};
