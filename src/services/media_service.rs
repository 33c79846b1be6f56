use crate::models::Profile;
use crate::repositories::Store;

use super::ServiceError;

/// Served when a profile has no picture: a transparent 1x1 GIF89a.
pub const PLACEHOLDER_IMAGE: [u8; 42] = [
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xFF, 0xFF, 0xFF, 0x21, 0xF9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x01, 0x44, 0x00, 0x3B,
];

/// Stores and serves profile pictures.
#[derive(Clone)]
pub struct MediaService {
    store: Store,
}

impl MediaService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Replaces the stored picture. Empty payloads are rejected so a stored
    /// picture is always a non-empty blob.
    pub async fn upload_picture(
        &self,
        profile_id: i64,
        picture: Vec<u8>,
    ) -> Result<Profile, ServiceError> {
        let mut profile = self
            .store
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(ServiceError::ProfileNotFound(profile_id))?;

        if picture.is_empty() {
            return Err(ServiceError::Validation(
                "Picture file cannot be empty".to_string(),
            ));
        }

        let size = picture.len();
        profile.picture = Some(picture);
        let profile = self.store.profiles.save(profile).await?;
        tracing::info!("Stored {} byte picture for profile {}", size, profile_id);

        Ok(profile)
    }

    /// Returns the stored picture, or the placeholder for an unknown profile
    /// or one without a picture.
    pub async fn download_picture(&self, profile_id: i64) -> Result<Vec<u8>, ServiceError> {
        let picture = self
            .store
            .profiles
            .find_by_id(profile_id)
            .await?
            .and_then(|profile| profile.picture);

        Ok(picture.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_vec()))
    }
}
