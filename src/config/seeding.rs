use anyhow::Result;

use crate::models::{NewMuscleGroup, NewWorkout};
use crate::repositories::Store;

/// Fills the workout and muscle group catalog, which this API only reads.
pub struct DatabaseSeeder {
    store: Store,
}

impl DatabaseSeeder {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn seed_all(&self) -> Result<()> {
        if !self.store.catalog.is_empty().await? {
            tracing::info!("Catalog already populated, skipping seeding");
            return Ok(());
        }

        tracing::info!("Starting catalog seeding...");

        self.seed_muscle_groups().await?;
        self.seed_workouts().await?;

        tracing::info!("Catalog seeding completed!");
        Ok(())
    }

    async fn seed_muscle_groups(&self) -> Result<()> {
        let groups = [
            ("Chest", "Pectoralis major and minor"),
            ("Back", "Latissimus dorsi, rhomboids and trapezius"),
            ("Legs", "Quadriceps, hamstrings and calves"),
            ("Shoulders", "Anterior, lateral and posterior deltoids"),
            ("Arms", "Biceps, triceps and forearms"),
            ("Core", "Rectus abdominis, obliques and lower back"),
        ];

        for (name, description) in groups {
            self.store
                .catalog
                .insert_muscle_group(NewMuscleGroup {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .await?;
        }

        tracing::info!("Seeded {} muscle groups", groups.len());
        Ok(())
    }

    async fn seed_workouts(&self) -> Result<()> {
        let workouts = [
            ("Full body strength", "strength"),
            ("Upper body push", "strength"),
            ("Lower body power", "strength"),
            ("Core circuit", "circuit"),
            ("Mobility flow", "mobility"),
        ];

        for (name, workout_type) in workouts {
            self.store
                .catalog
                .insert_workout(NewWorkout {
                    name: name.to_string(),
                    workout_type: workout_type.to_string(),
                })
                .await?;
        }

        tracing::info!("Seeded {} workouts", workouts.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let store = Store::in_memory();
        let seeder = DatabaseSeeder::new(store.clone());

        seeder.seed_all().await.unwrap();
        seeder.seed_all().await.unwrap();

        let workouts = store.catalog.find_workouts(&[1, 2, 3, 4, 5, 6]).await.unwrap();
        assert_eq!(workouts.len(), 5);
        let core = store.catalog.find_muscle_group(6).await.unwrap().unwrap();
        assert_eq!(core.name, "Core");
        assert!(store.catalog.find_muscle_group(7).await.unwrap().is_none());
    }
}
