use std::process::{Command, Output};

use tracing::{debug, info};

use crate::{error::AppError, profile::Profile};

/// Git config key for the commit author name
pub const USER_NAME_KEY: &str = "user.name";
/// Git config key for the commit author email
pub const USER_EMAIL_KEY: &str = "user.email";

/// Read/write access to Git configuration values
pub trait GitConfig {
    /// Sets `key` to `value`
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    /// Reads the effective value of `key`
    fn get(&self, key: &str) -> Result<String, AppError>;
}

/// Config file that `set` writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigScope {
    /// `~/.gitconfig`
    #[default]
    Global,
    /// `.git/config` of the current repository
    Local,
}

impl ConfigScope {
    fn flag(self) -> &'static str {
        match self {
            ConfigScope::Global => "--global",
            ConfigScope::Local => "--local",
        }
    }
}

/// `GitConfig` backed by the `git` executable
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli {
    pub scope: ConfigScope,
}

impl GitCli {
    pub fn new(scope: ConfigScope) -> Self {
        Self { scope }
    }
}

/// Turns a finished git process into its stdout, or its stderr as an error
fn check_output(git_command_output: Output) -> Result<String, AppError> {
    if !git_command_output.status.success() {
        let stderr = String::from_utf8(git_command_output.stderr)?.trim().to_string();
        let message = if stderr.is_empty() {
            format!("git exited with {}", git_command_output.status)
        } else {
            stderr
        };
        return Err(AppError::GitCommand(message));
    }

    Ok(String::from_utf8_lossy(&git_command_output.stdout).to_string())
}

impl GitConfig for GitCli {
    /// Executes a Git config set command
    ///
    /// # Arguments
    /// * `key` - Git config key to set (user.name or user.email)
    /// * `value` - Value to set for key (username or email)
    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        debug!(key, scope = ?self.scope, "git config set");
        let git_command_output: Output = Command::new("git")
            .args(["config", self.scope.flag(), key, value])
            .output()?;
        check_output(git_command_output)?;
        Ok(())
    }

    /// Executes Git config get command
    ///
    /// # Arguments
    /// * `key` - Git config key (user.name or user.email)
    fn get(&self, key: &str) -> Result<String, AppError> {
        debug!(key, "git config get");
        let git_command_output: Output = Command::new("git")
            .args(["config", "--get", key])
            .output()?;
        Ok(check_output(git_command_output)?.trim().to_string())
    }
}

/// Identity Git currently uses for commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// True when the profile carries this exact name and email
    pub fn matches(&self, profile: &Profile) -> bool {
        profile.name == self.name && profile.email == self.email
    }
}

/// Writes the profile's name then email to Git config.
///
/// Stops at the first failure. A name written before a failed email write
/// stays in place.
pub fn apply_profile(git: &dyn GitConfig, profile: &Profile) -> Result<(), AppError> {
    git.set(USER_NAME_KEY, &profile.name)?;
    git.set(USER_EMAIL_KEY, &profile.email)?;
    info!(name = %profile.name, email = %profile.email, "applied git identity");
    Ok(())
}

/// Reads the identity Git currently uses
pub fn active_identity(git: &dyn GitConfig) -> Result<Identity, AppError> {
    let name = git.get(USER_NAME_KEY)?;
    let email = git.get(USER_EMAIL_KEY)?;
    Ok(Identity { name, email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryGit;

    #[test]
    fn apply_sets_name_then_email() {
        let git = MemoryGit::new();
        let profile = Profile::new("Jane Doe", "jane@x.com").with_signing_key("KEY");

        apply_profile(&git, &profile).unwrap();

        assert_eq!(*git.writes.borrow(), vec![USER_NAME_KEY, USER_EMAIL_KEY]);
        assert_eq!(git.value(USER_NAME_KEY).as_deref(), Some("Jane Doe"));
        assert_eq!(git.value(USER_EMAIL_KEY).as_deref(), Some("jane@x.com"));
    }

    #[test]
    fn apply_stops_after_first_failure() {
        let git = MemoryGit::new().failing_on(USER_NAME_KEY);

        let result = apply_profile(&git, &Profile::new("Jane Doe", "jane@x.com"));

        assert!(matches!(result, Err(AppError::GitCommand(_))));
        assert_eq!(*git.writes.borrow(), vec![USER_NAME_KEY]);
        assert_eq!(git.value(USER_EMAIL_KEY), None);
    }

    #[test]
    fn failed_email_write_keeps_new_name() {
        let git = MemoryGit::with_identity("Old", "old@x.com").failing_on(USER_EMAIL_KEY);

        let result = apply_profile(&git, &Profile::new("Jane Doe", "jane@x.com"));

        assert!(result.is_err());
        assert_eq!(git.value(USER_NAME_KEY).as_deref(), Some("Jane Doe"));
        assert_eq!(git.value(USER_EMAIL_KEY).as_deref(), Some("old@x.com"));
    }

    #[test]
    fn active_identity_reads_both_keys() {
        let git = MemoryGit::with_identity("Jane Doe", "jane@x.com");

        let identity = active_identity(&git).unwrap();

        assert!(identity.matches(&Profile::new("Jane Doe", "jane@x.com")));
        assert!(!identity.matches(&Profile::new("Jane Doe", "other@x.com")));
    }

    #[test]
    fn active_identity_fails_without_config() {
        assert!(active_identity(&MemoryGit::new()).is_err());
    }

    #[test]
    fn scope_flags() {
        assert_eq!(ConfigScope::default(), ConfigScope::Global);
        assert_eq!(ConfigScope::Global.flag(), "--global");
        assert_eq!(ConfigScope::Local.flag(), "--local");
    }

    #[cfg(unix)]
    #[test]
    fn failed_process_reports_stderr() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        let output = Output {
            status: ExitStatus::from_raw(1 << 8),
            stdout: Vec::new(),
            stderr: b"error: could not lock config file\n".to_vec(),
        };

        match check_output(output) {
            Err(AppError::GitCommand(message)) => {
                assert_eq!(message, "error: could not lock config file")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
