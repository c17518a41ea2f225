use std::{fmt::Write as _, path::Path};

use colored::Colorize;
use tracing::debug;

use crate::{
    editor::{edit_profile, warn_on_odd_email},
    error::AppError,
    git::{GitConfig, Identity, active_identity, apply_profile},
    profile::Profile,
    prompt::{Prompter, prompt_until_valid},
    storage::ProfileStore,
    transfer::{ImportStrategy, apply_import, export_profiles, read_import},
    validation::validate_profile_name,
};

/// Formats the profile listing, marking the profile that matches `active`
pub fn render_listing(store: &ProfileStore, active: Option<&Identity>) -> String {
    let mut listing = String::new();
    for (profile_name, profile) in store.iter() {
        let marker = match active {
            Some(identity) if identity.matches(profile) => format!(" {}", "(active)".green()),
            _ => String::new(),
        };
        let _ = writeln!(listing, "{} {}{}", "profile:".blue(), profile_name.bold(), marker);
        let _ = writeln!(listing, "  name:  {}", profile.name);
        let _ = writeln!(listing, "  email: {}", profile.email);
        if let Some(key) = profile.signing_key() {
            let _ = writeln!(listing, "  signing key: {key}");
        }
        listing.push('\n');
    }
    listing
}

/// Lists all profiles, marking the one Git currently uses
pub fn list_profiles(store: &ProfileStore, git: &dyn GitConfig) -> Result<(), AppError> {
    if store.is_empty() {
        println!(
            "{}",
            "no profiles found, use 'git-profile add' to create one".yellow()
        );
        return Ok(());
    }

    let active: Option<Identity> = match active_identity(git) {
        Ok(identity) => Some(identity),
        Err(err) => {
            debug!(error = %err, "no active git identity, nothing marked");
            None
        }
    };

    print!("{}", render_listing(store, active.as_ref()));
    Ok(())
}

/// Resolves the profile a command acts on: the given name, or a selection
///
/// # Arguments
/// * `store` - Profiles to choose from
/// * `prompter` - Used only when `profile_name` is `None`
/// * `profile_name` - Name given on the command line
/// * `label` - Selection prompt message
pub fn choose_profile(
    store: &ProfileStore,
    prompter: &dyn Prompter,
    profile_name: Option<&str>,
    label: &str,
) -> Result<String, AppError> {
    if let Some(name) = profile_name {
        store.require(name)?;
        return Ok(name.to_string());
    }

    store.ensure_not_empty()?;
    prompter.select(label, store.names())
}

/// Adds a profile from command-line arguments, or interactively when none are given
pub fn add_profile(
    store: &mut ProfileStore,
    prompter: &dyn Prompter,
    profile_name: Option<&str>,
    git_username: Option<&str>,
    git_email: Option<&str>,
) -> Result<String, AppError> {
    let (profile_name, profile) = match (profile_name, git_username, git_email) {
        (Some(profile_name), Some(git_username), Some(git_email)) => {
            warn_on_odd_email(git_email);
            (
                profile_name.to_string(),
                Profile::new(git_username, git_email),
            )
        }
        (None, None, None) => {
            let existing: &ProfileStore = store;
            let profile_name = prompt_until_valid(prompter, "enter profile name:", |input| {
                validate_profile_name(input, existing)
            })?;
            let profile = edit_profile(prompter, None)?;
            (profile_name, profile)
        }
        _ => {
            return Err(AppError::Validation(
                "add expects either no arguments or <profile> <username> <email>".to_string(),
            ));
        }
    };

    store.update(|staged| staged.add(&profile_name, profile))?;
    println!("{} '{}'", "added profile".green(), profile_name);
    Ok(profile_name)
}

/// Re-prompts every field of an existing profile, keeping fields left empty
pub fn edit_existing_profile(
    store: &mut ProfileStore,
    prompter: &dyn Prompter,
    profile_name: Option<&str>,
) -> Result<String, AppError> {
    let profile_name = choose_profile(store, prompter, profile_name, "select profile to edit:")?;
    let existing: Profile = store.require(&profile_name)?.clone();

    let updated = edit_profile(prompter, Some(&existing))?;
    store.update(|staged| staged.upsert(&profile_name, updated))?;

    println!("{} '{}'", "updated profile".green(), profile_name);
    Ok(profile_name)
}

/// Removes a profile after confirmation
pub fn remove_profile(
    store: &mut ProfileStore,
    prompter: &dyn Prompter,
    profile_name: Option<&str>,
    skip_confirmation: bool,
) -> Result<String, AppError> {
    let profile_name =
        choose_profile(store, prompter, profile_name, "select profile to remove:")?;

    if !skip_confirmation {
        let confirmed =
            prompter.confirm(&format!("remove profile '{profile_name}'?"))?;
        if !confirmed {
            return Err(AppError::Cancelled("removal cancelled".to_string()));
        }
    }

    store.update(|staged| {
        staged.remove(&profile_name);
        Ok(())
    })?;
    println!("{} '{}'", "removed profile".green(), profile_name);
    Ok(profile_name)
}

/// Applies a profile to the Git configuration; the store is not modified
pub fn apply_selected_profile(
    store: &ProfileStore,
    prompter: &dyn Prompter,
    git: &dyn GitConfig,
    profile_name: Option<&str>,
) -> Result<String, AppError> {
    let profile_name = choose_profile(store, prompter, profile_name, "select profile to apply:")?;
    let profile = store.require(&profile_name)?;

    apply_profile(git, profile)?;
    println!("{} '{}'", "applied profile".green(), profile_name);
    Ok(profile_name)
}

/// Exports all profiles and prints the destination
pub fn export_all(store: &ProfileStore, output_file: Option<&Path>) -> Result<(), AppError> {
    let written = export_profiles(store.profiles(), output_file)?;
    println!("{} {}", "profiles exported to:".green(), written.display());
    Ok(())
}

/// Imports profiles from a file using the given or a selected strategy
pub fn import_all(
    store: &mut ProfileStore,
    prompter: &dyn Prompter,
    input_file: &Path,
    strategy: Option<ImportStrategy>,
) -> Result<usize, AppError> {
    let imported = read_import(input_file)?;

    let strategy = match strategy {
        Some(strategy) => strategy,
        None => {
            let labels: Vec<String> = ImportStrategy::ALL
                .iter()
                .map(|strategy| strategy.label().to_string())
                .collect();
            let chosen = prompter.select("import strategy:", labels)?;
            ImportStrategy::from_label(&chosen).ok_or_else(|| {
                AppError::Validation(format!("unknown import strategy '{chosen}'"))
            })?
        }
    };

    store.update(|staged| Ok(apply_import(staged, imported, strategy)))?;
    println!(
        "{} total profiles: {}",
        "profiles imported.".green(),
        store.len()
    );
    Ok(store.len())
}
