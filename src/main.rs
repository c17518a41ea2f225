use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use git_profile::{
    cli::{Cli, Commands},
    commands::{
        add_profile, apply_selected_profile, edit_existing_profile, export_all, import_all,
        list_profiles, remove_profile,
    },
    error::AppError,
    git::{ConfigScope, GitCli},
    logging,
    menu::run_menu,
    prompt::InquirePrompter,
    storage::{ProfileStore, get_global_profile_path},
};

// Main
fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_cancellation() => {
            println!("{}", err.to_string().yellow());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_path: PathBuf = match cli.config {
        Some(path) => path,
        None => get_global_profile_path()?,
    };
    debug!(path = %config_path.display(), "using profiles file");

    let mut store = ProfileStore::load(config_path)?;
    let prompter = InquirePrompter;

    match cli.command {
        Some(Commands::Ls) => list_profiles(&store, &GitCli::default()),
        Some(Commands::Add {
            profile_name,
            git_username,
            git_email,
        }) => add_profile(
            &mut store,
            &prompter,
            profile_name.as_deref(),
            git_username.as_deref(),
            git_email.as_deref(),
        )
        .map(|_| ()),
        Some(Commands::Edit { profile_name }) => {
            edit_existing_profile(&mut store, &prompter, profile_name.as_deref()).map(|_| ())
        }
        Some(Commands::Rm { profile_name, yes }) => {
            remove_profile(&mut store, &prompter, profile_name.as_deref(), yes).map(|_| ())
        }
        Some(Commands::Apply {
            profile_name,
            local,
        }) => {
            let scope = if local {
                ConfigScope::Local
            } else {
                ConfigScope::Global
            };
            apply_selected_profile(
                &store,
                &prompter,
                &GitCli::new(scope),
                profile_name.as_deref(),
            )
            .map(|_| ())
        }
        Some(Commands::Export { output_file }) => export_all(&store, output_file.as_deref()),
        Some(Commands::Import {
            input_file,
            strategy,
        }) => import_all(&mut store, &prompter, &input_file, strategy).map(|_| ()),
        None => run_menu(&mut store, &prompter, &GitCli::default()),
    }
}
