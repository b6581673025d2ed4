//! API middleware components

pub mod auth;
pub mod logging;
pub mod metrics;
pub mod security;
pub mod signature;

pub use auth::{api_key_middleware, RequireApiKey, API_KEY_HEADER};
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
pub use security::{security_headers_middleware, MAX_BODY_SIZE};
pub use signature::SignedJson;
