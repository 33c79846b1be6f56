// Persistence gateway: trait seam plus the Postgres and in-memory stores

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    CreateExercise, Exercise, MuscleGroup, NewMuscleGroup, NewWorkout, Profile, ProfileDetails,
    Workout,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{kind} {id} does not exist")]
    Missing { kind: &'static str, id: i64 },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// An entity kind the gateway can persist.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Client-supplied fields for a row that has no identifier yet.
    type Draft: Send + 'static;

    const KIND: &'static str;

    fn id(&self) -> i64;

    fn from_draft(id: i64, draft: Self::Draft) -> Self;

    /// Carries over state that `save` does not write, taken from the stored row.
    fn keep_unsaved(&mut self, _stored: &Self) {}
}

impl Entity for Exercise {
    type Draft = CreateExercise;

    const KIND: &'static str = "Exercise";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: CreateExercise) -> Self {
        Exercise::from_draft(id, draft)
    }

    // Workout links change only through replace_workouts
    fn keep_unsaved(&mut self, stored: &Self) {
        self.workouts = stored.workouts.clone();
    }
}

impl Entity for Profile {
    type Draft = ProfileDetails;

    const KIND: &'static str = "Profile";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: ProfileDetails) -> Self {
        Profile::from_draft(id, draft)
    }
}

/// Generic create/read/update/delete over one entity kind.
///
/// `insert` assigns the identifier; `save` overwrites the stored row with the
/// same identifier and fails with [`StoreError::Missing`] if there is none.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<E>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<E>>;

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    async fn insert(&self, draft: E::Draft) -> StoreResult<E>;

    async fn save(&self, entity: E) -> StoreResult<E>;

    async fn delete(&self, entity: &E) -> StoreResult<()>;

    /// Returns the number of removed rows.
    async fn delete_all(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait ExerciseRepository: Repository<Exercise> {
    /// Case-sensitive exact match.
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;

    /// Swaps the exercise's workout links for `workout_ids` in one step.
    /// The row itself is untouched; `save` never writes links.
    async fn replace_workouts(
        &self,
        exercise_id: i64,
        workout_ids: &BTreeSet<i64>,
    ) -> StoreResult<()>;
}

/// Workouts and muscle groups: read-only to the API, writable for seeding.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns the workouts that exist among `ids`, ordered by id.
    async fn find_workouts(&self, ids: &[i64]) -> StoreResult<Vec<Workout>>;

    async fn find_muscle_group(&self, id: i64) -> StoreResult<Option<MuscleGroup>>;

    async fn is_empty(&self) -> StoreResult<bool>;

    async fn insert_workout(&self, workout: NewWorkout) -> StoreResult<Workout>;

    async fn insert_muscle_group(&self, group: NewMuscleGroup) -> StoreResult<MuscleGroup>;
}

/// Persistence handle passed to routers and services.
#[derive(Clone)]
pub struct Store {
    pub exercises: Arc<dyn ExerciseRepository>,
    pub profiles: Arc<dyn Repository<Profile>>,
    pub catalog: Arc<dyn CatalogRepository>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            exercises: store.clone(),
            profiles: store.clone(),
            catalog: store,
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            exercises: store.clone(),
            profiles: store.clone(),
            catalog: store,
        }
    }
}
