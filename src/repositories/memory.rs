use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use super::{
    CatalogRepository, Entity, ExerciseRepository, Repository, StoreError, StoreResult,
};
use crate::models::{
    Exercise, MuscleGroup, NewMuscleGroup, NewWorkout, Profile, Workout,
};

/// Rows of one entity kind with a sequence for identifiers, like a BIGSERIAL table.
#[derive(Debug)]
pub struct Table<E> {
    next_id: i64,
    rows: BTreeMap<i64, E>,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<E> Table<E> {
    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Process-local store used by tests and the `memory` backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    exercises: RwLock<Table<Exercise>>,
    profiles: RwLock<Table<Profile>>,
    workouts: RwLock<Table<Workout>>,
    muscle_groups: RwLock<Table<MuscleGroup>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Selects the table backing one entity kind.
pub trait HasTable<E> {
    fn table(&self) -> &RwLock<Table<E>>;
}

impl HasTable<Exercise> for MemoryStore {
    fn table(&self) -> &RwLock<Table<Exercise>> {
        &self.exercises
    }
}

impl HasTable<Profile> for MemoryStore {
    fn table(&self) -> &RwLock<Table<Profile>> {
        &self.profiles
    }
}

#[async_trait]
impl<E> Repository<E> for MemoryStore
where
    E: Entity,
    MemoryStore: HasTable<E>,
{
    async fn find_all(&self) -> StoreResult<Vec<E>> {
        let table = self.table().read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<E>> {
        let table = self.table().read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let table = self.table().read().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn insert(&self, draft: E::Draft) -> StoreResult<E> {
        let mut table = self.table().write().await;
        let id = table.next_id();
        let entity = E::from_draft(id, draft);
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn save(&self, mut entity: E) -> StoreResult<E> {
        let mut table = self.table().write().await;
        match table.rows.get_mut(&entity.id()) {
            Some(row) => {
                entity.keep_unsaved(row);
                *row = entity.clone();
                Ok(entity)
            }
            None => Err(StoreError::Missing {
                kind: E::KIND,
                id: entity.id(),
            }),
        }
    }

    async fn delete(&self, entity: &E) -> StoreResult<()> {
        let mut table = self.table().write().await;
        table.rows.remove(&entity.id());
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut table = self.table().write().await;
        let removed = table.rows.len() as u64;
        table.rows.clear();
        Ok(removed)
    }
}

#[async_trait]
impl ExerciseRepository for MemoryStore {
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        let table = self.exercises.read().await;
        Ok(table.rows.values().any(|exercise| exercise.name == name))
    }

    async fn replace_workouts(
        &self,
        exercise_id: i64,
        workout_ids: &BTreeSet<i64>,
    ) -> StoreResult<()> {
        let mut table = self.exercises.write().await;
        match table.rows.get_mut(&exercise_id) {
            Some(exercise) => {
                exercise.workouts = workout_ids.clone();
                Ok(())
            }
            None => Err(StoreError::Missing {
                kind: Exercise::KIND,
                id: exercise_id,
            }),
        }
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn find_workouts(&self, ids: &[i64]) -> StoreResult<Vec<Workout>> {
        let table = self.workouts.read().await;
        let mut workouts: Vec<Workout> = ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect();
        workouts.sort_by_key(|workout| workout.id);
        workouts.dedup_by_key(|workout| workout.id);
        Ok(workouts)
    }

    async fn find_muscle_group(&self, id: i64) -> StoreResult<Option<MuscleGroup>> {
        let table = self.muscle_groups.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn is_empty(&self) -> StoreResult<bool> {
        let workouts = self.workouts.read().await;
        let muscle_groups = self.muscle_groups.read().await;
        Ok(workouts.rows.is_empty() && muscle_groups.rows.is_empty())
    }

    async fn insert_workout(&self, workout: NewWorkout) -> StoreResult<Workout> {
        let mut table = self.workouts.write().await;
        let id = table.next_id();
        let workout = Workout {
            id,
            name: workout.name,
            workout_type: workout.workout_type,
            complete: false,
        };
        table.rows.insert(id, workout.clone());
        Ok(workout)
    }

    async fn insert_muscle_group(&self, group: NewMuscleGroup) -> StoreResult<MuscleGroup> {
        let mut table = self.muscle_groups.write().await;
        let id = table.next_id();
        let group = MuscleGroup {
            id,
            name: group.name,
            description: group.description,
        };
        table.rows.insert(id, group.clone());
        Ok(group)
    }
}
