use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::keys;
use super::middleware::{
    api_key_middleware, logging_middleware, metrics_middleware, security_headers_middleware,
    MAX_BODY_SIZE,
};
use super::places;
use super::state::AppState;

/// Create the full router with application state
///
/// `extra` routes, such as the metrics endpoint, are merged before the
/// middleware stack so they get the same headers and tracing.
pub fn create_router_with_state(state: AppState, extra: Option<Router>) -> Router {
    let require_api_key = middleware::from_fn_with_state(state.clone(), api_key_middleware);

    let router = Router::new()
        // Health endpoints (no state needed)
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Diagnostics, unauthenticated
        .route("/test-db", get(health::test_db))
        // Signed bootstrap
        .route("/generate-api-key", post(keys::generate_api_key))
        // API key + rate limit gated
        .route(
            "/places",
            get(places::list_places)
                .post(places::create_place)
                .route_layer(require_api_key),
        )
        .with_state(state);

    let router = match extra {
        Some(extra) => router.merge(extra),
        None => router,
    };

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
