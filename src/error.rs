use crate::output::{OutputLine, Style};
use thiserror::Error;

/// Everything a command, the navigator or the presenter can fail with.
///
/// Errors never escape the dispatcher: each one is rendered as exactly one
/// output line whose style comes from [`ShellError::style`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("Command not found: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing argument (usage: {usage})")]
    MissingArgument { command: String, usage: String },

    #[error("cd: {0}: No such directory")]
    DirectoryNotFound(String),

    #[error("cd: {0}: Not a directory")]
    NotADirectory(String),

    #[error("Already at root directory")]
    AlreadyAtRoot,

    #[error("Empty directory")]
    EmptyDirectory,

    #[error("{0}: No such file or directory")]
    NotFound(String),

    #[error("{command}: {target}: No such file or directory")]
    NoSuchEntry { command: String, target: String },

    #[error("Failed to load page {page}: {reason}")]
    PageLoadError { page: String, reason: String },

    #[error("Failed to fetch {0}")]
    NetworkFetchFailure(String),

    #[error("request failed: {0}")]
    Http(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("storage write failed: {0}")]
    Storage(String),
}

impl ShellError {
    pub fn page_load(page: &str, reason: impl Into<String>) -> Self {
        ShellError::PageLoadError {
            page: page.to_string(),
            reason: reason.into(),
        }
    }

    pub fn style(&self) -> Style {
        match self {
            ShellError::AlreadyAtRoot => Style::Warning,
            ShellError::EmptyDirectory => Style::Info,
            _ => Style::Error,
        }
    }
}

impl From<&ShellError> for OutputLine {
    fn from(err: &ShellError) -> Self {
        OutputLine::new(err.to_string(), err.style())
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::InvalidConfig(err.to_string())
    }
}
