//! Place endpoints, gated by API key

use axum::{extract::State, http::StatusCode};
use tracing::debug;

use crate::api::middleware::RequireApiKey;
use crate::api::state::AppState;
use crate::api::types::{ApiError, CreatePlaceRequest, Json, PlaceResponse};
use crate::domain::NewPlace;

/// GET /places
pub async fn list_places(
    State(state): State<AppState>,
    RequireApiKey(record): RequireApiKey,
) -> Result<Json<Vec<PlaceResponse>>, ApiError> {
    debug!(key_prefix = %record.key().prefix(), "Listing places");

    let places = state.place_service.list().await?;

    Ok(Json(places.into_iter().map(PlaceResponse::from).collect()))
}

/// POST /places
pub async fn create_place(
    State(state): State<AppState>,
    RequireApiKey(record): RequireApiKey,
    Json(request): Json<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<PlaceResponse>), ApiError> {
    debug!(key_prefix = %record.key().prefix(), "Creating place");

    let new_place = NewPlace::try_from(request)?;
    let place = state.place_service.create(new_place).await?;

    Ok((StatusCode::CREATED, Json(place.into())))
}
