//! Place validation utilities

use thiserror::Error;

/// Errors that can occur during place validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaceValidationError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

/// Coordinates only need to be finite; no range or datum is enforced
pub fn validate_coordinate(field: &'static str, value: f64) -> Result<(), PlaceValidationError> {
    if !value.is_finite() {
        return Err(PlaceValidationError::NotFinite(field));
    }

    Ok(())
}
