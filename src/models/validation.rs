use anyhow::{anyhow, Result};

use super::{CreateExercise, ProfileDetails, UpdateExercise};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Exercise name validation
pub fn validate_exercise_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("Exercise name cannot be empty"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(anyhow!(
            "Exercise name cannot be longer than {} characters",
            MAX_NAME_LENGTH
        ));
    }

    Ok(())
}

pub fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(anyhow!(
            "Description cannot be longer than {} characters",
            MAX_DESCRIPTION_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_create_exercise(request: &CreateExercise) -> Result<()> {
    validate_exercise_name(&request.name)?;
    validate_description(&request.description)
}

pub fn validate_update_exercise(request: &UpdateExercise) -> Result<()> {
    validate_exercise_name(&request.name)?;
    validate_description(&request.description)
}

/// Weight in kilograms
pub fn validate_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(anyhow!("Weight must be a positive number"));
    }
    Ok(())
}

/// Height in centimetres
pub fn validate_height(height: f64) -> Result<()> {
    if !height.is_finite() || height <= 0.0 {
        return Err(anyhow!("Height must be a positive number"));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<()> {
    if age < 0 {
        return Err(anyhow!("Age cannot be negative"));
    }
    Ok(())
}

/// Free-form label; only blank values are refused and the text is stored as sent.
pub fn validate_label(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{} cannot be empty", field));
    }
    Ok(())
}

pub fn validate_profile_details(details: &ProfileDetails) -> Result<()> {
    validate_weight(details.weight)?;
    validate_height(details.height)?;
    validate_age(details.age)?;
    validate_label("Fitness level", &details.fitness_level)?;
    validate_label("Training frequency", &details.training_frequency)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProfileDetails {
        ProfileDetails {
            weight: 72.5,
            height: 180.0,
            age: 29,
            fitness_level: "Intermediate".to_string(),
            training_frequency: "weekly".to_string(),
            contributor_request: false,
        }
    }

    #[test]
    fn test_exercise_name_validation() {
        assert!(validate_exercise_name("Squat").is_ok());
        assert!(validate_exercise_name("").is_err());
        assert!(validate_exercise_name("   ").is_err());
        assert!(validate_exercise_name(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_exercise_name(&"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_description_validation() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(validate_weight(72.5).is_ok());
        assert!(validate_weight(0.0).is_err());
        assert!(validate_weight(-3.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_height(180.0).is_ok());
        assert!(validate_height(f64::INFINITY).is_err());
        assert!(validate_age(0).is_ok());
        assert!(validate_age(10).is_ok());
        assert!(validate_age(-1).is_err());
    }

    #[test]
    fn test_labels_are_free_form() {
        assert!(validate_label("Fitness level", "3").is_ok());
        assert!(validate_label("Training frequency", "2x per week").is_ok());
        assert!(validate_label("Fitness level", "").is_err());
        assert!(validate_label("Fitness level", "  ").is_err());
    }

    #[test]
    fn test_profile_details() {
        assert!(validate_profile_details(&details()).is_ok());
        assert!(validate_profile_details(&ProfileDetails {
            training_frequency: String::new(),
            ..details()
        })
        .is_err());
    }
}
