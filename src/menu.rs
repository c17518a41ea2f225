use std::path::PathBuf;

use colored::Colorize;

use crate::{
    commands::{
        add_profile, apply_selected_profile, edit_existing_profile, export_all, import_all,
        list_profiles, remove_profile,
    },
    error::AppError,
    git::GitConfig,
    prompt::{Prompter, prompt_until_valid},
    storage::ProfileStore,
    validation::validate_required,
};

/// Actions offered by the interactive menu
const ACTIONS: [&str; 8] = [
    "list profiles",
    "add profile",
    "edit profile",
    "remove profile",
    "apply profile",
    "export profiles",
    "import profiles",
    "quit",
];

/// Runs interactive menu interface until the user quits
///
/// Cancelled and failed actions are reported and the menu continues. Errors
/// from the terminal itself end the menu.
pub fn run_menu(
    store: &mut ProfileStore,
    prompter: &dyn Prompter,
    git: &dyn GitConfig,
) -> Result<(), AppError> {
    loop {
        let actions: Vec<String> = ACTIONS.iter().map(|action| action.to_string()).collect();
        let action_selected: String = match prompter.select("select action", actions) {
            Ok(action) => action,
            Err(err) if err.is_cancellation() => "quit".to_string(),
            Err(err) => return Err(err),
        };

        let result: Result<(), AppError> = match action_selected.as_str() {
            "list profiles" => list_profiles(store, git),
            "add profile" => add_profile(store, prompter, None, None, None).map(|_| ()),
            "edit profile" => edit_existing_profile(store, prompter, None).map(|_| ()),
            "remove profile" => remove_profile(store, prompter, None, false).map(|_| ()),
            "apply profile" => apply_selected_profile(store, prompter, git, None).map(|_| ()),
            "export profiles" => menu_export(store, prompter),
            "import profiles" => menu_import(store, prompter),
            "quit" => {
                println!("{}", "quitting".yellow());
                break Ok(());
            }
            other => Err(AppError::Validation(format!("unexpected action '{other}'"))),
        };

        match result {
            Ok(()) => {}
            Err(err) if err.is_cancellation() => println!("{}", err.to_string().yellow()),
            Err(AppError::Inquire(err)) => return Err(AppError::Inquire(err)),
            Err(err) => println!("{}", err.to_string().red()),
        }
    }
}

/// Menu for exporting, empty input writes to the default location
fn menu_export(store: &ProfileStore, prompter: &dyn Prompter) -> Result<(), AppError> {
    let output: String = prompter.text("export to (empty for default):", None)?;
    let output: Option<PathBuf> = if output.is_empty() {
        None
    } else {
        Some(PathBuf::from(output))
    };
    export_all(store, output.as_deref())
}

/// Menu for importing from a file
fn menu_import(store: &mut ProfileStore, prompter: &dyn Prompter) -> Result<(), AppError> {
    let input: String = prompt_until_valid(prompter, "import from:", |input| {
        validate_required("import file", input)
    })?;
    import_all(store, prompter, &PathBuf::from(input), None).map(|_| ())
}
