//! Storage-backed place repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::place::{Place, PlaceRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of PlaceRepository
#[derive(Debug)]
pub struct StoragePlaceRepository {
    storage: Arc<dyn Storage<Place>>,
}

impl StoragePlaceRepository {
    pub fn new(storage: Arc<dyn Storage<Place>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PlaceRepository for StoragePlaceRepository {
    async fn list(&self) -> Result<Vec<Place>, DomainError> {
        self.storage.list().await
    }

    async fn create(&self, place: Place) -> Result<Place, DomainError> {
        self.storage.create(place).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.storage.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::place::NewPlace;
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::storage::InMemoryStorage;

    #[tokio::test]
    async fn test_create_then_list() {
        let repo = StoragePlaceRepository::new(Arc::new(InMemoryStorage::new()));
        let place = NewPlace::new(45.5, -73.6).unwrap().into_place();

        repo.create(place.clone()).await.unwrap();

        assert_eq!(repo.list().await.unwrap(), vec![place]);
    }

    #[tokio::test]
    async fn test_ping_reports_storage_errors() {
        let storage = MockStorage::<Place>::new().with_error("no route to host");
        let repo = StoragePlaceRepository::new(Arc::new(storage));

        assert!(repo.ping().await.is_err());
    }
}
