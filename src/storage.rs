use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::AppError,
    profile::Profile,
    validation::{validate_new_profile, validate_profile_name},
};

/// Profiles file in user's home directory
const GLOBAL_GIT_PROFILES_FILE: &str = ".git-profiles.json";

/// Profile name to profile mapping as persisted on disk
pub type ProfileMap = BTreeMap<String, Profile>;

/// Gets the path to the profiles file in the home directory
pub fn get_global_profile_path() -> Result<PathBuf, AppError> {
    let home_dir: PathBuf = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
    Ok(home_dir.join(GLOBAL_GIT_PROFILES_FILE))
}

/// Reads a profile mapping from a JSON file.
///
/// Returns `Ok(None)` when the file does not exist. An empty file is an
/// empty mapping.
pub fn read_profile_map(path: &Path) -> Result<Option<ProfileMap>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let file_contents: String = fs::read_to_string(path)?;
    if file_contents.trim().is_empty() {
        return Ok(Some(ProfileMap::new()));
    }

    Ok(Some(serde_json::from_str(&file_contents)?))
}

/// Writes a profile mapping as two-space indented JSON, overwriting the file
pub fn write_profile_map(path: &Path, profiles: &ProfileMap) -> Result<(), AppError> {
    let json: String = serde_json::to_string_pretty(profiles)?;
    fs::write(path, json)?;
    Ok(())
}

/// In-memory profile store bound to the file it was loaded from
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: ProfileMap,
}

impl ProfileStore {
    /// Creates an empty store that will be saved to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            profiles: ProfileMap::new(),
        }
    }

    /// Loads the store from `path`, starting empty when the file is absent
    ///
    /// # Arguments
    /// * `path` - Location of the profiles file
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path: PathBuf = path.into();
        let profiles: ProfileMap = match read_profile_map(&path)? {
            Some(profiles) => profiles,
            None => {
                debug!(path = %path.display(), "profiles file missing, starting empty");
                ProfileMap::new()
            }
        };
        debug!(path = %path.display(), count = profiles.len(), "loaded profiles");
        Ok(Self { path, profiles })
    }

    /// Saves every profile to the store's file
    pub fn save(&self) -> Result<(), AppError> {
        write_profile_map(&self.path, &self.profiles)?;
        debug!(path = %self.path.display(), count = self.profiles.len(), "saved profiles");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the store, saves the copy, and only then
    /// swaps it in. A failed change or save leaves the store untouched.
    pub fn update<T, F>(&mut self, change: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut ProfileStore) -> Result<T, AppError>,
    {
        let mut staged: ProfileStore = self.clone();
        let value = change(&mut staged)?;
        staged.save()?;
        *self = staged;
        Ok(value)
    }

    /// Adds a new profile, rejecting empty or duplicate names
    ///
    /// # Arguments
    /// * `name` - Unique profile name
    /// * `profile` - Identity stored under that name
    pub fn add(&mut self, name: &str, profile: Profile) -> Result<(), AppError> {
        validate_profile_name(name, self)?;
        validate_new_profile(&profile)?;
        self.profiles.insert(name.to_string(), profile);
        Ok(())
    }

    /// Replaces the profile stored under an existing name
    pub fn upsert(&mut self, name: &str, profile: Profile) -> Result<(), AppError> {
        match self.profiles.get_mut(name) {
            Some(slot) => {
                *slot = profile;
                Ok(())
            }
            None => Err(AppError::ProfileNotFound(name.to_string())),
        }
    }

    /// Removes a profile, doing nothing when the name is absent
    pub fn remove(&mut self, name: &str) -> Option<Profile> {
        self.profiles.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Gets a profile or fails with `ProfileNotFound`
    pub fn require(&self, name: &str) -> Result<&Profile, AppError> {
        self.get(name)
            .ok_or_else(|| AppError::ProfileNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Iterates profiles in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Profile)> {
        self.profiles.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profiles(&self) -> &ProfileMap {
        &self.profiles
    }

    /// Substitutes the whole mapping
    pub fn replace_all(&mut self, profiles: ProfileMap) {
        self.profiles = profiles;
    }

    /// Inserts a profile only when its name is not taken, returns whether it was added
    pub fn insert_if_absent(&mut self, name: String, profile: Profile) -> bool {
        if self.profiles.contains_key(&name) {
            return false;
        }
        self.profiles.insert(name, profile);
        true
    }

    /// Fails with `NoProfiles` when there is nothing to select from
    pub fn ensure_not_empty(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::NoProfiles);
        }
        Ok(())
    }
}
