//! Place request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{NewPlace, Place, PlaceValidationError};

/// Body of `POST /places`; both coordinates must be JSON numbers
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatePlaceRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<CreatePlaceRequest> for NewPlace {
    type Error = PlaceValidationError;

    fn try_from(request: CreatePlaceRequest) -> Result<Self, Self::Error> {
        NewPlace::new(request.latitude, request.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        Self {
            id: place.id.as_str().to_string(),
            latitude: place.latitude,
            longitude: place.longitude,
            created_at: place.created_at,
        }
    }
}
