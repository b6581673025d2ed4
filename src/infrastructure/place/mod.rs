//! Place infrastructure - storage-backed repository and service

mod service;
mod storage_repository;

pub use service::PlaceService;
pub use storage_repository::StoragePlaceRepository;
