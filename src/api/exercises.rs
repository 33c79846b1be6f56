use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use axum_extra::extract::WithRejection;

use crate::models::{CreateExercise, Exercise, MuscleGroup, UpdateExercise, Workout};
use crate::repositories::Store;
use crate::services::{ExerciseService, ServiceError};

type ExercisePath = WithRejection<Path<i64>, ServiceError>;

#[derive(Clone)]
pub struct ExercisesAppState {
    pub exercise_service: ExerciseService,
}

pub fn exercise_routes(store: Store) -> Router {
    let shared_state = ExercisesAppState {
        exercise_service: ExerciseService::new(store),
    };

    Router::new()
        .route(
            "/",
            get(get_all_exercises)
                .post(create_exercise)
                .delete(delete_all_exercises),
        )
        .route(
            "/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
        .route("/:id/workouts", get(get_exercise_workouts))
        .route("/:id/update/workouts", put(update_exercise_workouts))
        .route("/:id/muscleGroup", get(get_exercise_muscle_group))
        .with_state(shared_state)
}

/// Get all exercises without any filter
pub async fn get_all_exercises(
    State(state): State<ExercisesAppState>,
) -> Result<Json<Vec<Exercise>>, ServiceError> {
    let exercises = state.exercise_service.list_exercises().await?;
    Ok(Json(exercises))
}

/// Get a specific exercise
pub async fn get_exercise(
    State(state): State<ExercisesAppState>,
    WithRejection(Path(exercise_id), _): ExercisePath,
) -> Result<Json<Exercise>, ServiceError> {
    let exercise = state.exercise_service.get_exercise(exercise_id).await?;
    Ok(Json(exercise))
}

/// Create an exercise; the name must not be taken yet
pub async fn create_exercise(
    State(state): State<ExercisesAppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateExercise>, ServiceError>,
) -> Result<(StatusCode, Json<Exercise>), ServiceError> {
    let exercise = state.exercise_service.create_exercise(request).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// Update name and description of an exercise
pub async fn update_exercise(
    State(state): State<ExercisesAppState>,
    WithRejection(Path(exercise_id), _): ExercisePath,
    WithRejection(Json(request), _): WithRejection<Json<UpdateExercise>, ServiceError>,
) -> Result<Json<Exercise>, ServiceError> {
    let exercise = state
        .exercise_service
        .update_exercise(exercise_id, request)
        .await?;
    Ok(Json(exercise))
}

pub async fn delete_exercise(
    State(state): State<ExercisesAppState>,
    WithRejection(Path(exercise_id), _): ExercisePath,
) -> Result<StatusCode, ServiceError> {
    state.exercise_service.delete_exercise(exercise_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all_exercises(
    State(state): State<ExercisesAppState>,
) -> Result<StatusCode, ServiceError> {
    state.exercise_service.delete_all_exercises().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get all workouts linked to an exercise
pub async fn get_exercise_workouts(
    State(state): State<ExercisesAppState>,
    WithRejection(Path(exercise_id), _): ExercisePath,
) -> Result<Json<Vec<Workout>>, ServiceError> {
    let workouts = state.exercise_service.get_workouts_of(exercise_id).await?;
    Ok(Json(workouts))
}

/// Replace the workouts linked to an exercise. Body: array of workout ids
pub async fn update_exercise_workouts(
    State(state): State<ExercisesAppState>,
    WithRejection(Path(exercise_id), _): ExercisePath,
    WithRejection(Json(workout_ids), _): WithRejection<Json<Vec<i64>>, ServiceError>,
) -> Result<Json<Exercise>, ServiceError> {
    let exercise = state
        .exercise_service
        .update_exercise_workouts(exercise_id, &workout_ids)
        .await?;
    Ok(Json(exercise))
}

/// Muscle group of an exercise, `null` when none is assigned
pub async fn get_exercise_muscle_group(
    State(state): State<ExercisesAppState>,
    WithRejection(Path(exercise_id), _): ExercisePath,
) -> Result<Json<Option<MuscleGroup>>, ServiceError> {
    let group = state.exercise_service.get_muscle_group_of(exercise_id).await?;
    Ok(Json(group))
}
