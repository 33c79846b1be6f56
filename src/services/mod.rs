// Business logic services

pub mod error;
pub mod exercise_service;
pub mod profile_service;
pub mod media_service;

pub use error::ServiceError;
pub use exercise_service::ExerciseService;
pub use profile_service::ProfileService;
pub use media_service::{MediaService, PLACEHOLDER_IMAGE};
