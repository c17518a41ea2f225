use inquire::InquireError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails for a reason other than cancellation
    #[error("inquire error: {0}")]
    Inquire(InquireError),
    /// Error when executing Git commands
    #[error("git command failed: {0}")]
    GitCommand(String),
    /// Error during input validation
    #[error("validation error: {0}")]
    Validation(String),
    /// Error when a named profile is not in the store
    #[error("profile not found: '{0}'")]
    ProfileNotFound(String),
    /// Error when the home directory cannot be determined
    #[error("failed to find the home directory")]
    HomeDirNotFound,
    /// Error during UTF-8 conversion
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    /// A selection was requested but the store holds no profiles
    #[error("no profiles found, use 'git-profile add' to create one")]
    NoProfiles,
    /// User aborted a prompt or declined a confirmation
    #[error("{0}")]
    Cancelled(String),
}

impl AppError {
    /// True for outcomes the user chose (abort, "no", nothing to select),
    /// which are reported but do not count as failures.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, AppError::Cancelled(_) | AppError::NoProfiles)
    }
}

impl From<InquireError> for AppError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                AppError::Cancelled("cancelled".to_string())
            }
            other => AppError::Inquire(other),
        }
    }
}
