use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use tracing::warn;

use crate::models::{ProfileDetails, ProfileResponse};
use crate::repositories::Store;
use crate::services::{MediaService, ProfileService, ServiceError};

type ProfilePath = WithRejection<Path<i64>, ServiceError>;

/// Multipart field carrying the picture bytes.
pub const PICTURE_FIELD: &str = "file";

#[derive(Clone)]
pub struct ProfilesAppState {
    pub profile_service: ProfileService,
    pub media_service: MediaService,
}

pub fn profile_routes(store: Store, max_picture_bytes: usize) -> Router {
    let shared_state = ProfilesAppState {
        profile_service: ProfileService::new(store.clone()),
        media_service: MediaService::new(store),
    };

    Router::new()
        .route(
            "/",
            get(get_all_profiles)
                .post(create_profile)
                .delete(delete_all_profiles),
        )
        .route(
            "/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route(
            "/:id/picture",
            get(download_picture)
                .post(upload_picture)
                .layer(DefaultBodyLimit::max(max_picture_bytes)),
        )
        .with_state(shared_state)
}

pub async fn get_all_profiles(
    State(state): State<ProfilesAppState>,
) -> Result<Json<Vec<ProfileResponse>>, ServiceError> {
    let profiles = state.profile_service.list_profiles().await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

pub async fn get_profile(
    State(state): State<ProfilesAppState>,
    WithRejection(Path(profile_id), _): ProfilePath,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let profile = state.profile_service.get_profile(profile_id).await?;
    Ok(Json(profile.into()))
}

pub async fn create_profile(
    State(state): State<ProfilesAppState>,
    WithRejection(Json(details), _): WithRejection<Json<ProfileDetails>, ServiceError>,
) -> Result<(StatusCode, Json<ProfileResponse>), ServiceError> {
    let profile = state.profile_service.create_profile(details).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// Overwrites weight, height, age, fitness level, training frequency and the
/// contributor flag in one go
pub async fn update_profile(
    State(state): State<ProfilesAppState>,
    WithRejection(Path(profile_id), _): ProfilePath,
    WithRejection(Json(details), _): WithRejection<Json<ProfileDetails>, ServiceError>,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let profile = state
        .profile_service
        .update_profile(profile_id, details)
        .await?;
    Ok(Json(profile.into()))
}

pub async fn delete_profile(
    State(state): State<ProfilesAppState>,
    WithRejection(Path(profile_id), _): ProfilePath,
) -> Result<StatusCode, ServiceError> {
    state.profile_service.delete_profile(profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all_profiles(
    State(state): State<ProfilesAppState>,
) -> Result<StatusCode, ServiceError> {
    state.profile_service.delete_all_profiles().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload a profile picture as multipart form data (field `file`)
pub async fn upload_picture(
    State(state): State<ProfilesAppState>,
    WithRejection(Path(profile_id), _): ProfilePath,
    WithRejection(mut multipart, _): WithRejection<Multipart, ServiceError>,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let mut picture: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Failed to read multipart field: {}", e);
        ServiceError::from(e)
    })? {
        if field.name() != Some(PICTURE_FIELD) {
            // Ignore unknown fields
            continue;
        }

        let bytes = field.bytes().await.map_err(|e| {
            warn!("Failed to read picture bytes for profile {}: {}", profile_id, e);
            ServiceError::from(e)
        })?;
        picture = Some(bytes.to_vec());
    }

    let picture = picture.ok_or_else(|| {
        ServiceError::Upload(format!("Multipart field '{}' is required", PICTURE_FIELD))
    })?;

    let profile = state
        .media_service
        .upload_picture(profile_id, picture)
        .await?;
    Ok(Json(profile.into()))
}

/// Download the profile picture; a blank image stands in when there is none
pub async fn download_picture(
    State(state): State<ProfilesAppState>,
    WithRejection(Path(profile_id), _): ProfilePath,
) -> Result<impl IntoResponse, ServiceError> {
    let picture = state.media_service.download_picture(profile_id).await?;
    Ok(([(header::CONTENT_TYPE, mime::IMAGE_JPEG.to_string())], picture))
}
