use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use tracing::info;

use crate::{
    error::AppError,
    storage::{ProfileMap, ProfileStore, write_profile_map},
};

/// Export file written to the home directory when no path is given
const DEFAULT_EXPORT_FILE: &str = "git-profiles-export.json";

/// Gets the default export destination in the home directory
pub fn default_export_path() -> Result<PathBuf, AppError> {
    let home_dir: PathBuf = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
    Ok(export_path_in(&home_dir))
}

/// Default export destination inside `home_dir`
pub fn export_path_in(home_dir: &Path) -> PathBuf {
    home_dir.join(DEFAULT_EXPORT_FILE)
}

/// Appends `.json` unless the path already ends with it
pub fn ensure_json_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "json") {
        return path.to_path_buf();
    }
    let mut with_ext = path.as_os_str().to_owned();
    with_ext.push(".json");
    PathBuf::from(with_ext)
}

/// Writes every profile to an export file and returns where it went
///
/// # Arguments
/// * `profiles` - Profiles to export
/// * `destination` - Output path, the home-directory default when `None`
pub fn export_profiles(
    profiles: &ProfileMap,
    destination: Option<&Path>,
) -> Result<PathBuf, AppError> {
    match destination {
        Some(path) => write_export(profiles, path),
        None => write_export(profiles, &default_export_path()?),
    }
}

/// Same as [`export_profiles`] with the default resolved inside `home_dir`
pub fn export_profiles_in(
    profiles: &ProfileMap,
    destination: Option<&Path>,
    home_dir: &Path,
) -> Result<PathBuf, AppError> {
    match destination {
        Some(path) => write_export(profiles, path),
        None => write_export(profiles, &export_path_in(home_dir)),
    }
}

fn write_export(profiles: &ProfileMap, path: &Path) -> Result<PathBuf, AppError> {
    let output_path: PathBuf = ensure_json_extension(path);
    write_profile_map(&output_path, profiles)?;
    info!(path = %output_path.display(), count = profiles.len(), "exported profiles");
    Ok(output_path)
}

/// Reads an export file, which must be a name to profile mapping.
///
/// Parsing is strict: an empty file is malformed, not an empty mapping.
pub fn read_import(path: &Path) -> Result<ProfileMap, AppError> {
    if !path.exists() {
        return Err(AppError::Validation(format!(
            "import file '{}' does not exist",
            path.display()
        )));
    }
    let file_contents: String = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&file_contents)?)
}

/// How imported profiles combine with the existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Add new profiles, keep existing ones untouched
    Merge,
    /// Discard existing profiles and keep only the imported ones
    Replace,
}

impl ImportStrategy {
    pub const ALL: [ImportStrategy; 2] = [ImportStrategy::Merge, ImportStrategy::Replace];

    /// Menu label shown when asking for a strategy
    pub fn label(self) -> &'static str {
        match self {
            ImportStrategy::Merge => "merge (add new profiles, keep existing)",
            ImportStrategy::Replace => "replace (overwrite all existing profiles)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|strategy| strategy.label() == label)
    }
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStrategy::Merge => write!(f, "merge"),
            ImportStrategy::Replace => write!(f, "replace"),
        }
    }
}

impl FromStr for ImportStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(ImportStrategy::Merge),
            "replace" => Ok(ImportStrategy::Replace),
            other => Err(AppError::Validation(format!(
                "unknown import strategy '{other}', expected 'merge' or 'replace'"
            ))),
        }
    }
}

/// Combines imported profiles into the store and returns how many were added.
///
/// Merge never overwrites a profile that already exists under the same name.
pub fn apply_import(
    store: &mut ProfileStore,
    imported: ProfileMap,
    strategy: ImportStrategy,
) -> usize {
    let added = match strategy {
        ImportStrategy::Merge => {
            let mut added = 0;
            for (name, profile) in imported {
                if store.insert_if_absent(name, profile) {
                    added += 1;
                }
            }
            added
        }
        ImportStrategy::Replace => {
            let count = imported.len();
            store.replace_all(imported);
            count
        }
    };
    info!(%strategy, added, total = store.len(), "imported profiles");
    added
}
