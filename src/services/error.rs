use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repositories::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Exercise {0} not found")]
    ExerciseNotFound(i64),
    #[error("Profile {0} not found")]
    ProfileNotFound(i64),
    #[error("Muscle group {0} not found")]
    MuscleGroupNotFound(i64),
    #[error("An exercise named '{0}' already exists")]
    DuplicateExerciseName(String),
    #[error("Unknown workout ids: {0:?}")]
    UnknownWorkouts(Vec<i64>),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Upload failed: {0}")]
    Upload(String),
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::ExerciseNotFound(_)
            | ServiceError::ProfileNotFound(_)
            | ServiceError::MuscleGroupNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::DuplicateExerciseName(_) => StatusCode::CONFLICT,
            ServiceError::UnknownWorkouts(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Validation(_) | ServiceError::Upload(_) => StatusCode::BAD_REQUEST,
            ServiceError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            // A row vanished between the existence check and the write
            ServiceError::Store(StoreError::Missing { .. }) => StatusCode::NOT_FOUND,
            ServiceError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ServiceError::ExerciseNotFound(_) => "EXERCISE_NOT_FOUND",
            ServiceError::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            ServiceError::MuscleGroupNotFound(_) => "MUSCLE_GROUP_NOT_FOUND",
            ServiceError::DuplicateExerciseName(_) => "EXERCISE_ALREADY_EXISTS",
            ServiceError::UnknownWorkouts(_) => "UNKNOWN_WORKOUTS",
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Upload(_) => "UPLOAD_ERROR",
            ServiceError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ServiceError::Store(StoreError::Missing { .. }) => "NOT_FOUND",
            ServiceError::Store(StoreError::Database(_)) => "DATABASE_ERROR",
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ServiceError {
    fn from(rejection: MultipartRejection) -> Self {
        ServiceError::Upload(rejection.body_text())
    }
}

impl From<MultipartError> for ServiceError {
    fn from(error: MultipartError) -> Self {
        // The body limit surfaces as a stream error while fields are read
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServiceError::PayloadTooLarge(error.body_text())
        } else {
            ServiceError::Upload(error.body_text())
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ServiceError::Store(StoreError::Database(e)) => {
                tracing::error!("Store operation failed: {}", e);
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!("Request rejected: {}", other);
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": self.code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}
