use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named fitness activity linked to workouts and at most one muscle group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub muscle_group_id: Option<i64>,
    /// Ids of the workouts this exercise belongs to.
    #[sqlx(skip)]
    #[serde(default)]
    pub workouts: BTreeSet<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExercise {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub muscle_group_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExercise {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Exercise {
    pub fn from_draft(id: i64, draft: CreateExercise) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            muscle_group_id: draft.muscle_group_id,
            workouts: BTreeSet::new(),
        }
    }

    /// Name and description are replaced together; associations are untouched.
    pub fn apply(&mut self, update: UpdateExercise) {
        self.name = update.name;
        self.description = update.description;
    }
}
