//! Wire types for the HTTP API

pub mod api_key;
pub mod error;
pub mod json;
pub mod place;

pub use api_key::{GenerateApiKeyRequest, GenerateApiKeyResponse};
pub use error::{ApiError, ApiErrorCode, ApiErrorResponse};
pub use json::Json;
pub use place::{CreatePlaceRequest, PlaceResponse};
