use std::collections::BTreeSet;

use crate::models::{
    validate_create_exercise, validate_update_exercise, CreateExercise, Exercise, MuscleGroup,
    UpdateExercise, Workout,
};
use crate::repositories::Store;

use super::ServiceError;

/// Exercise CRUD plus the workout and muscle group associations.
#[derive(Clone)]
pub struct ExerciseService {
    store: Store,
}

impl ExerciseService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ServiceError> {
        Ok(self.store.exercises.find_all().await?)
    }

    pub async fn get_exercise(&self, exercise_id: i64) -> Result<Exercise, ServiceError> {
        self.store
            .exercises
            .find_by_id(exercise_id)
            .await?
            .ok_or(ServiceError::ExerciseNotFound(exercise_id))
    }

    /// Case-sensitive exact match on the exercise name.
    pub async fn check_if_exercise_exists(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(self.store.exercises.exists_by_name(name).await?)
    }

    pub async fn create_exercise(&self, request: CreateExercise) -> Result<Exercise, ServiceError> {
        validate_create_exercise(&request).map_err(|e| ServiceError::Validation(e.to_string()))?;

        if self.check_if_exercise_exists(&request.name).await? {
            return Err(ServiceError::DuplicateExerciseName(request.name));
        }

        if let Some(group_id) = request.muscle_group_id {
            if self.store.catalog.find_muscle_group(group_id).await?.is_none() {
                return Err(ServiceError::MuscleGroupNotFound(group_id));
            }
        }

        let exercise = self.store.exercises.insert(request).await?;
        tracing::info!("Created exercise {} ({})", exercise.id, exercise.name);

        Ok(exercise)
    }

    /// Replaces name and description. Names are not re-checked for uniqueness here.
    pub async fn update_exercise(
        &self,
        exercise_id: i64,
        request: UpdateExercise,
    ) -> Result<Exercise, ServiceError> {
        validate_update_exercise(&request).map_err(|e| ServiceError::Validation(e.to_string()))?;

        let mut exercise = self.get_exercise(exercise_id).await?;
        exercise.apply(request);

        let exercise = self.store.exercises.save(exercise).await?;
        tracing::info!("Updated exercise {}", exercise.id);

        Ok(exercise)
    }

    pub async fn delete_exercise(&self, exercise_id: i64) -> Result<(), ServiceError> {
        let exercise = self.get_exercise(exercise_id).await?;
        self.store.exercises.delete(&exercise).await?;
        tracing::info!("Deleted exercise {}", exercise_id);
        Ok(())
    }

    pub async fn delete_all_exercises(&self) -> Result<u64, ServiceError> {
        let removed = self.store.exercises.delete_all().await?;
        tracing::info!("Deleted all exercises ({} removed)", removed);
        Ok(removed)
    }

    /// Replaces the exercise's workout set with `workout_ids`.
    ///
    /// Every id must name an existing workout; otherwise nothing is written and
    /// the unknown ids are reported. Duplicate ids collapse, and an empty list
    /// clears the associations.
    pub async fn update_exercise_workouts(
        &self,
        exercise_id: i64,
        workout_ids: &[i64],
    ) -> Result<Exercise, ServiceError> {
        let mut exercise = self.get_exercise(exercise_id).await?;

        let requested: BTreeSet<i64> = workout_ids.iter().copied().collect();
        let ids: Vec<i64> = requested.iter().copied().collect();
        let resolved: BTreeSet<i64> = self
            .store
            .catalog
            .find_workouts(&ids)
            .await?
            .into_iter()
            .map(|workout| workout.id)
            .collect();

        let unknown: Vec<i64> = requested.difference(&resolved).copied().collect();
        if !unknown.is_empty() {
            return Err(ServiceError::UnknownWorkouts(unknown));
        }

        self.store
            .exercises
            .replace_workouts(exercise_id, &resolved)
            .await?;
        exercise.workouts = resolved;
        tracing::info!(
            "Exercise {} now linked to {} workouts",
            exercise.id,
            exercise.workouts.len()
        );

        Ok(exercise)
    }

    pub async fn get_workouts_of(&self, exercise_id: i64) -> Result<Vec<Workout>, ServiceError> {
        let exercise = self.get_exercise(exercise_id).await?;
        let ids: Vec<i64> = exercise.workouts.into_iter().collect();
        Ok(self.store.catalog.find_workouts(&ids).await?)
    }

    /// `None` when the exercise has no muscle group assigned.
    pub async fn get_muscle_group_of(
        &self,
        exercise_id: i64,
    ) -> Result<Option<MuscleGroup>, ServiceError> {
        let exercise = self.get_exercise(exercise_id).await?;
        match exercise.muscle_group_id {
            Some(group_id) => Ok(self.store.catalog.find_muscle_group(group_id).await?),
            None => Ok(None),
        }
    }
}
