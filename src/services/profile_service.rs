use crate::models::{validate_profile_details, Profile, ProfileDetails};
use crate::repositories::Store;

use super::ServiceError;

#[derive(Clone)]
pub struct ProfileService {
    store: Store,
}

impl ProfileService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, ServiceError> {
        Ok(self.store.profiles.find_all().await?)
    }

    pub async fn get_profile(&self, profile_id: i64) -> Result<Profile, ServiceError> {
        self.store
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(ServiceError::ProfileNotFound(profile_id))
    }

    /// Profiles carry no uniqueness constraint; every valid payload creates a new row.
    pub async fn create_profile(&self, details: ProfileDetails) -> Result<Profile, ServiceError> {
        validate_profile_details(&details).map_err(|e| ServiceError::Validation(e.to_string()))?;

        let profile = self.store.profiles.insert(details).await?;
        tracing::info!("Created profile {}", profile.id);

        Ok(profile)
    }

    /// Overwrites all six attributes together; the stored picture is left as is.
    pub async fn update_profile(
        &self,
        profile_id: i64,
        details: ProfileDetails,
    ) -> Result<Profile, ServiceError> {
        validate_profile_details(&details).map_err(|e| ServiceError::Validation(e.to_string()))?;

        let mut profile = self.get_profile(profile_id).await?;
        profile.apply(details);

        let profile = self.store.profiles.save(profile).await?;
        tracing::info!("Updated profile {}", profile.id);

        Ok(profile)
    }

    pub async fn delete_profile(&self, profile_id: i64) -> Result<(), ServiceError> {
        let profile = self.get_profile(profile_id).await?;
        self.store.profiles.delete(&profile).await?;
        tracing::info!("Deleted profile {}", profile_id);
        Ok(())
    }

    pub async fn delete_all_profiles(&self) -> Result<u64, ServiceError> {
        let removed = self.store.profiles.delete_all().await?;
        tracing::info!("Deleted all profiles ({} removed)", removed);
        Ok(removed)
    }
}
