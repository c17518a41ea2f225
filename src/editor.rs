use crate::{
    error::AppError,
    profile::Profile,
    prompt::{Prompter, prompt_until_valid},
    validation::{email_looks_valid, validate_required},
};
use colored::Colorize;
use tracing::debug;

/// Empty input keeps the existing value, anything else replaces it
pub fn merge_field(existing: Option<&str>, input: &str) -> String {
    match existing {
        Some(current) if input.is_empty() => current.to_string(),
        _ => input.to_string(),
    }
}

/// Collects profile fields from the user.
///
/// With an `existing` profile every prompt shows the current value and empty
/// input keeps it. For a new profile, name and email are asked again until
/// they are non-empty; the signing key may be left blank.
///
/// # Arguments
/// * `prompter` - Source of user input
/// * `existing` - Profile being edited, `None` when creating
pub fn edit_profile(
    prompter: &dyn Prompter,
    existing: Option<&Profile>,
) -> Result<Profile, AppError> {
    let name = match existing {
        Some(profile) => {
            let input = prompter.text("enter git username:", Some(&profile.name))?;
            merge_field(Some(&profile.name), &input)
        }
        None => prompt_until_valid(prompter, "enter git username:", |input| {
            validate_required("name", input)
        })?,
    };

    let email = match existing {
        Some(profile) => {
            let input = prompter.text("enter git email:", Some(&profile.email))?;
            merge_field(Some(&profile.email), &input)
        }
        None => prompt_until_valid(prompter, "enter git email:", |input| {
            validate_required("email", input)
        })?,
    };
    warn_on_odd_email(&email);

    let current_key = existing.and_then(Profile::signing_key);
    let key_input = prompter.text("enter signing key (optional):", current_key)?;
    let signing_key = merge_field(existing.map(|profile| profile.signing.key.as_str()), &key_input);

    Ok(Profile::new(name, email).with_signing_key(signing_key))
}

/// Prints a warning for emails that do not look like addresses
pub fn warn_on_odd_email(email: &str) {
    if !email.is_empty() && !email_looks_valid(email) {
        debug!(email, "email does not look like an address");
        println!(
            "{} '{}' does not look like an email address, keeping it anyway",
            "warning:".yellow(),
            email
        );
    }
}
