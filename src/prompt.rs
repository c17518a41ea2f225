use colored::Colorize;
use inquire::{Confirm, Select, Text};

use crate::error::AppError;

/// Interactive input capability used by the editor and the commands.
///
/// Aborting a prompt surfaces as [`AppError::Cancelled`].
pub trait Prompter {
    /// Asks for free text. `current` is shown as the value kept on empty input;
    /// the raw entered text is returned either way.
    fn text(&self, label: &str, current: Option<&str>) -> Result<String, AppError>;

    /// Asks the user to pick one of `options`
    fn select(&self, label: &str, options: Vec<String>) -> Result<String, AppError>;

    /// Asks a yes/no question, defaulting to no
    fn confirm(&self, label: &str) -> Result<bool, AppError>;
}

/// Terminal prompter backed by `inquire`
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(&self, label: &str, current: Option<&str>) -> Result<String, AppError> {
        let message = format!("{}", label.blue());
        let input: String = match current {
            Some(current) if !current.is_empty() => Text::new(&message)
                .with_placeholder(current)
                .with_help_message("press Enter to keep the current value")
                .prompt()?,
            _ => Text::new(&message).prompt()?,
        };
        Ok(input.trim().to_string())
    }

    fn select(&self, label: &str, options: Vec<String>) -> Result<String, AppError> {
        Ok(Select::new(&format!("{}", label.blue()), options).prompt()?)
    }

    fn confirm(&self, label: &str) -> Result<bool, AppError> {
        Ok(Confirm::new(&format!("{}", label.blue()))
            .with_default(false)
            .prompt()?)
    }
}

/// Prompts user for input until valid input is provided
///
/// Validation failures are printed and the prompt repeats; any other error
/// (including cancellation) is returned.
pub fn prompt_until_valid<F>(
    prompter: &dyn Prompter,
    prompt_message: &str,
    input_validation: F,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Result<(), AppError>,
{
    loop {
        let input: String = prompter.text(prompt_message, None)?;
        match input_validation(&input) {
            Ok(_) => break Ok(input),
            Err(AppError::Validation(msg)) => println!("{}", msg.red()),
            Err(e) => return Err(e),
        }
    }
}
