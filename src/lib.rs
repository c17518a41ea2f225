//! Manage named Git identity profiles.
//!
//! Profiles (name, email, optional signing key) live in `~/.git-profiles.json`
//! and can be applied to the Git configuration, exported and imported.

pub mod cli;
pub mod commands;
pub mod editor;
pub mod error;
pub mod git;
pub mod logging;
pub mod menu;
#[cfg(test)]
mod mock;
pub mod profile;
pub mod prompt;
pub mod storage;
pub mod transfer;
pub mod validation;

pub use error::AppError;
pub use profile::{Profile, Signing};
pub use storage::ProfileStore;
