use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub weight: f64,
    pub height: f64,
    pub age: i32,
    pub fitness_level: String,
    pub training_frequency: String,
    pub contributor_request: bool,
    /// Raw image bytes; never embedded in JSON, served by the picture endpoint.
    #[serde(skip)]
    pub picture: Option<Vec<u8>>,
}

/// The six client-editable profile attributes, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub weight: f64,
    pub height: f64,
    pub age: i32,
    pub fitness_level: String,
    pub training_frequency: String,
    #[serde(default)]
    pub contributor_request: bool,
}

/// Profile as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub has_picture: bool,
}

impl Profile {
    pub fn from_draft(id: i64, details: ProfileDetails) -> Self {
        Self {
            id,
            weight: details.weight,
            height: details.height,
            age: details.age,
            fitness_level: details.fitness_level,
            training_frequency: details.training_frequency,
            contributor_request: details.contributor_request,
            picture: None,
        }
    }

    /// Overwrites all six attributes at once. The picture is kept.
    pub fn apply(&mut self, details: ProfileDetails) {
        self.weight = details.weight;
        self.height = details.height;
        self.age = details.age;
        self.fitness_level = details.fitness_level;
        self.training_frequency = details.training_frequency;
        self.contributor_request = details.contributor_request;
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let has_picture = profile.picture.is_some();
        Self { profile, has_picture }
    }
}
