//! Place service - list and create places

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::place::{NewPlace, Place, PlaceRepository};
use crate::domain::DomainError;

/// Place service backed by a repository
#[derive(Debug)]
pub struct PlaceService<R>
where
    R: PlaceRepository,
{
    repository: Arc<R>,
}

impl<R: PlaceRepository> PlaceService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// All places in creation order
    pub async fn list(&self) -> Result<Vec<Place>, DomainError> {
        let places = self.repository.list().await?;
        debug!(count = places.len(), "Listed places");
        Ok(places)
    }

    /// Store a new place and return it with its assigned id
    pub async fn create(&self, new_place: NewPlace) -> Result<Place, DomainError> {
        let created = self.repository.create(new_place.into_place()).await?;
        info!(place_id = %created.id, "Place created");
        Ok(created)
    }

    /// Round trip to the backing store
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}
