use validator::ValidateEmail;

use crate::{error::AppError, profile::Profile, storage::ProfileStore};

// Validate input helper functions

/// Validates a new profile name against the store
pub fn validate_profile_name(name: &str, store: &ProfileStore) -> Result<(), AppError> {
    if name.trim().is_empty() {
        Err(AppError::Validation("profile name cannot be empty".to_string()))
    } else if store.contains(name) {
        Err(AppError::Validation(format!("profile '{name}' already exists")))
    } else {
        Ok(())
    }
}

/// Validates that a required field was filled in
pub fn validate_required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}

/// Validates the fields a profile must carry when it is created
pub fn validate_new_profile(profile: &Profile) -> Result<(), AppError> {
    validate_required("name", &profile.name)?;
    validate_required("email", &profile.email)
}

/// Soft email check. Git accepts any string, so callers only warn on this.
pub fn email_looks_valid(email: &str) -> bool {
    email.validate_email()
}
