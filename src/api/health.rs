//! Health and diagnostic endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;

use crate::api::types::{ApiError, Json};

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Body of a successful `GET /test-db`
#[derive(Serialize)]
pub struct DatabaseCheckResponse {
    pub message: String,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness check - simple check to verify the service is running
/// Used by Kubernetes liveness checks to detect crashes
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /test-db
///
/// Unauthenticated connectivity check. Unlike every other failure path, the
/// store error is echoed back in `details`.
pub async fn test_db(
    State(state): State<AppState>,
) -> Result<Json<DatabaseCheckResponse>, ApiError> {
    match state.place_service.ping().await {
        Ok(()) => Ok(Json(DatabaseCheckResponse {
            message: "Database connection is working".to_string(),
        })),
        Err(e) => {
            warn!(error = %e, "Database connectivity check failed");
            Err(ApiError::storage_failure("Database connection failed").with_details(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
    }
}
