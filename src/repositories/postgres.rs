use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};

use super::{
    CatalogRepository, ExerciseRepository, Repository, StoreError, StoreResult,
};
use crate::models::{
    CreateExercise, Exercise, MuscleGroup, NewMuscleGroup, NewWorkout, Profile, ProfileDetails,
    Workout,
};

const EXERCISE_COLUMNS: &str = "id, name, description, muscle_group_id";
const PROFILE_COLUMNS: &str =
    "id, weight, height, age, fitness_level, training_frequency, contributor_request, picture";

/// PostgreSQL-backed store; schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn workout_ids_of(&self, exercise_id: i64) -> StoreResult<BTreeSet<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT workout_id FROM exercise_workouts WHERE exercise_id = $1",
        )
        .bind(exercise_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ids.into_iter().collect())
    }
}

#[async_trait]
impl Repository<Exercise> for PgStore {
    async fn find_all(&self) -> StoreResult<Vec<Exercise>> {
        let mut exercises = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {} FROM exercises ORDER BY id",
            EXERCISE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        let links = sqlx::query_as::<_, (i64, i64)>(
            "SELECT exercise_id, workout_id FROM exercise_workouts",
        )
        .fetch_all(&self.db)
        .await?;

        let mut workouts_by_exercise: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        for (exercise_id, workout_id) in links {
            workouts_by_exercise
                .entry(exercise_id)
                .or_default()
                .insert(workout_id);
        }

        for exercise in &mut exercises {
            if let Some(workouts) = workouts_by_exercise.remove(&exercise.id) {
                exercise.workouts = workouts;
            }
        }

        Ok(exercises)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Exercise>> {
        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {} FROM exercises WHERE id = $1",
            EXERCISE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        match exercise {
            Some(mut exercise) => {
                exercise.workouts = self.workout_ids_of(id).await?;
                Ok(Some(exercise))
            }
            None => Ok(None),
        }
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM exercises WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.db)
                .await?;

        Ok(exists)
    }

    async fn insert(&self, draft: CreateExercise) -> StoreResult<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            "INSERT INTO exercises (name, description, muscle_group_id) VALUES ($1, $2, $3) RETURNING {}",
            EXERCISE_COLUMNS
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.muscle_group_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exercise)
    }

    async fn save(&self, entity: Exercise) -> StoreResult<Exercise> {
        let updated = sqlx::query_as::<_, Exercise>(&format!(
            "UPDATE exercises SET name = $2, description = $3, muscle_group_id = $4 WHERE id = $1 RETURNING {}",
            EXERCISE_COLUMNS
        ))
        .bind(entity.id)
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(entity.muscle_group_id)
        .fetch_optional(&self.db)
        .await?;

        let Some(mut updated) = updated else {
            return Err(StoreError::Missing {
                kind: "Exercise",
                id: entity.id,
            });
        };

        updated.workouts = self.workout_ids_of(updated.id).await?;
        Ok(updated)
    }

    async fn delete(&self, entity: &Exercise) -> StoreResult<()> {
        sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(entity.id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM exercises").execute(&self.db).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ExerciseRepository for PgStore {
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM exercises WHERE name = $1)",
        )
        .bind(name)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    async fn replace_workouts(
        &self,
        exercise_id: i64,
        workout_ids: &BTreeSet<i64>,
    ) -> StoreResult<()> {
        let mut tx = self.db.begin().await?;

        // Lock the row so a concurrent delete cannot slip in between
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM exercises WHERE id = $1 FOR UPDATE")
            .bind(exercise_id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(StoreError::Missing {
                kind: "Exercise",
                id: exercise_id,
            });
        }

        sqlx::query("DELETE FROM exercise_workouts WHERE exercise_id = $1")
            .bind(exercise_id)
            .execute(&mut *tx)
            .await?;

        let ids: Vec<i64> = workout_ids.iter().copied().collect();
        if !ids.is_empty() {
            sqlx::query(
                "INSERT INTO exercise_workouts (exercise_id, workout_id) SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(exercise_id)
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Profile> for PgStore {
    async fn find_all(&self) -> StoreResult<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles ORDER BY id",
            PROFILE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(profiles)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(profile)
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.db)
                .await?;

        Ok(exists)
    }

    async fn insert(&self, draft: ProfileDetails) -> StoreResult<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (weight, height, age, fitness_level, training_frequency, contributor_request)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(draft.weight)
        .bind(draft.height)
        .bind(draft.age)
        .bind(&draft.fitness_level)
        .bind(&draft.training_frequency)
        .bind(draft.contributor_request)
        .fetch_one(&self.db)
        .await?;

        Ok(profile)
    }

    async fn save(&self, entity: Profile) -> StoreResult<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET weight = $2,
                height = $3,
                age = $4,
                fitness_level = $5,
                training_frequency = $6,
                contributor_request = $7,
                picture = $8
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(entity.id)
        .bind(entity.weight)
        .bind(entity.height)
        .bind(entity.age)
        .bind(&entity.fitness_level)
        .bind(&entity.training_frequency)
        .bind(entity.contributor_request)
        .bind(&entity.picture)
        .fetch_optional(&self.db)
        .await?;

        profile.ok_or(StoreError::Missing {
            kind: "Profile",
            id: entity.id,
        })
    }

    async fn delete(&self, entity: &Profile) -> StoreResult<()> {
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(entity.id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM profiles").execute(&self.db).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CatalogRepository for PgStore {
    async fn find_workouts(&self, ids: &[i64]) -> StoreResult<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            "SELECT id, name, workout_type, complete FROM workouts WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.db)
        .await?;

        Ok(workouts)
    }

    async fn find_muscle_group(&self, id: i64) -> StoreResult<Option<MuscleGroup>> {
        let group = sqlx::query_as::<_, MuscleGroup>(
            "SELECT id, name, description FROM muscle_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(group)
    }

    async fn is_empty(&self) -> StoreResult<bool> {
        let populated = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM workouts) OR EXISTS(SELECT 1 FROM muscle_groups)",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(!populated)
    }

    async fn insert_workout(&self, workout: NewWorkout) -> StoreResult<Workout> {
        let workout = sqlx::query_as::<_, Workout>(
            "INSERT INTO workouts (name, workout_type) VALUES ($1, $2) RETURNING id, name, workout_type, complete",
        )
        .bind(&workout.name)
        .bind(&workout.workout_type)
        .fetch_one(&self.db)
        .await?;

        Ok(workout)
    }

    async fn insert_muscle_group(&self, group: NewMuscleGroup) -> StoreResult<MuscleGroup> {
        let group = sqlx::query_as::<_, MuscleGroup>(
            "INSERT INTO muscle_groups (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(&group.name)
        .bind(&group.description)
        .fetch_one(&self.db)
        .await?;

        Ok(group)
    }
}
