//! Place domain

mod entity;
mod repository;
mod validation;

pub use entity::{NewPlace, Place, PlaceId};
pub use repository::PlaceRepository;
pub use validation::{validate_coordinate, PlaceValidationError};

#[cfg(test)]
pub use repository::MockPlaceRepository;
