//! API key bootstrap endpoint

use axum::{extract::State, http::StatusCode};
use tracing::debug;

use crate::api::middleware::SignedJson;
use crate::api::state::AppState;
use crate::api::types::{ApiError, GenerateApiKeyRequest, GenerateApiKeyResponse, Json};

/// POST /generate-api-key
pub async fn generate_api_key(
    State(state): State<AppState>,
    SignedJson(request): SignedJson<GenerateApiKeyRequest>,
) -> Result<(StatusCode, Json<GenerateApiKeyResponse>), ApiError> {
    debug!("Issuing API key from signed request");

    let issued = state.api_key_service.issue(request.name.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(issued.into())))
}
