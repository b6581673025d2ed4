//! Place entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_coordinate, PlaceValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Place identifier (UUID v4 string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for PlaceId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored geographic point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl StorageEntity for Place {
    type Key = PlaceId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Validated input for a new place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewPlace {
    latitude: f64,
    longitude: f64,
}

impl NewPlace {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PlaceValidationError> {
        validate_coordinate("latitude", latitude)?;
        validate_coordinate("longitude", longitude)?;

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Assign an identity and creation time
    pub fn into_place(self) -> Place {
        Place {
            id: PlaceId::generate(),
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: Utc::now(),
        }
    }
}
