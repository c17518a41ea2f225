use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::transfer::ImportStrategy;

/// Version line printed by `-v`/`--version`, with build metadata captured at compile time
pub fn version_string() -> String {
    format!(
        "{} (commit: {}, built: {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_PROFILE_COMMIT").unwrap_or("none"),
        option_env!("GIT_PROFILE_BUILD_DATE").unwrap_or("unknown"),
    )
}

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(
    name = "git-profile",
    about = "Manage multiple Git profiles easily",
    version = version_string(),
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Profiles file to use instead of ~/.git-profiles.json
    #[arg(long, global = true, env = "GIT_PROFILES_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand chosen to execute, interactive menu when absent
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists all saved profiles and marks the active one
    Ls,
    /// Adds a new profile, interactively when no arguments are given
    Add {
        /// Unique profile name
        profile_name: Option<String>,
        /// Git username
        git_username: Option<String>,
        /// Git email
        git_email: Option<String>,
    },
    /// Edits an existing profile
    Edit {
        /// Profile to edit, selected interactively when omitted
        profile_name: Option<String>,
    },
    /// Removes a profile
    Rm {
        /// Profile to remove, selected interactively when omitted
        profile_name: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Applies a profile to the Git configuration
    Apply {
        /// Profile to apply, selected interactively when omitted
        profile_name: Option<String>,
        /// Write to the current repository instead of the global config
        #[arg(long)]
        local: bool,
    },
    /// Exports all profiles to a JSON file
    Export {
        /// Output file, ~/git-profiles-export.json when omitted
        output_file: Option<PathBuf>,
    },
    /// Imports profiles from a JSON file
    Import {
        /// File previously written by `export`
        input_file: PathBuf,
        /// Import strategy, asked interactively when omitted
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<ImportStrategy>,
    },
}

fn parse_strategy(value: &str) -> Result<ImportStrategy, String> {
    value.parse().map_err(|err: crate::error::AppError| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_non_interactive_add() {
        let cli = Cli::parse_from(["git-profile", "add", "home", "Jane Doe", "jane@x.com"]);

        match cli.command {
            Some(Commands::Add {
                profile_name,
                git_username,
                git_email,
            }) => {
                assert_eq!(profile_name.as_deref(), Some("home"));
                assert_eq!(git_username.as_deref(), Some("Jane Doe"));
                assert_eq!(git_email.as_deref(), Some("jane@x.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_import_strategy() {
        let cli = Cli::parse_from(["git-profile", "import", "in.json", "--strategy", "replace"]);

        match cli.command {
            Some(Commands::Import { strategy, .. }) => {
                assert_eq!(strategy, Some(ImportStrategy::Replace))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn import_requires_input_file() {
        assert!(Cli::try_parse_from(["git-profile", "import"]).is_err());
    }

    #[test]
    fn short_version_flag_is_recognised() {
        let err = Cli::try_parse_from(["git-profile", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn version_string_includes_build_metadata() {
        let version = version_string();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(version.contains("commit:"));
        assert!(version.contains("built:"));
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::parse_from(["git-profile"]);
        assert!(cli.command.is_none());
    }
}
