//! Application state for shared services

use std::sync::Arc;

use crate::domain::api_key::{ApiKeyRecord, ApiKeyRepository};
use crate::domain::auth::{AuthenticationError, KeyIssueError};
use crate::domain::place::PlaceRepository;
use crate::domain::{DomainError, NewPlace, Place};
use crate::infrastructure::api_key::{ApiKeyService, IssuedApiKey, RateLimiter};
use crate::infrastructure::auth::SignatureVerifier;
use crate::infrastructure::place::PlaceService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub api_key_service: Arc<dyn ApiKeyServiceTrait>,
    pub place_service: Arc<dyn PlaceServiceTrait>,
    pub signature_verifier: Arc<SignatureVerifier>,
    pub rate_limiter: Arc<RateLimiter>,
}

/// Trait for API key service operations
#[async_trait::async_trait]
pub trait ApiKeyServiceTrait: Send + Sync {
    async fn issue(&self, name: Option<&str>) -> Result<IssuedApiKey, KeyIssueError>;
    async fn authenticate(&self, key: Option<&str>) -> Result<ApiKeyRecord, AuthenticationError>;
}

/// Trait for place service operations
#[async_trait::async_trait]
pub trait PlaceServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Place>, DomainError>;
    async fn create(&self, new_place: NewPlace) -> Result<Place, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: ApiKeyRepository + 'static> ApiKeyServiceTrait for ApiKeyService<R> {
    async fn issue(&self, name: Option<&str>) -> Result<IssuedApiKey, KeyIssueError> {
        ApiKeyService::issue(self, name).await
    }

    async fn authenticate(&self, key: Option<&str>) -> Result<ApiKeyRecord, AuthenticationError> {
        ApiKeyService::authenticate(self, key).await
    }
}

#[async_trait::async_trait]
impl<R: PlaceRepository + 'static> PlaceServiceTrait for PlaceService<R> {
    async fn list(&self) -> Result<Vec<Place>, DomainError> {
        PlaceService::list(self).await
    }

    async fn create(&self, new_place: NewPlace) -> Result<Place, DomainError> {
        PlaceService::create(self, new_place).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        PlaceService::ping(self).await
    }
}

impl AppState {
    pub fn new(
        api_key_service: Arc<dyn ApiKeyServiceTrait>,
        place_service: Arc<dyn PlaceServiceTrait>,
        signature_verifier: Arc<SignatureVerifier>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            api_key_service,
            place_service,
            signature_verifier,
            rate_limiter,
        }
    }
}
