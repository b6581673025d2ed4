//! Place repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Place;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistent collection of places
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync + Debug {
    /// All places in creation order
    async fn list(&self) -> Result<Vec<Place>, DomainError>;

    /// Persist a new place
    async fn create(&self, place: Place) -> Result<Place, DomainError>;

    /// Connectivity check for the backing store
    async fn ping(&self) -> Result<(), DomainError>;
}
