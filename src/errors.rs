use thiserror::Error;

use crate::source::ErrorDescriptor;

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Source error: {0}")]
    Source(ErrorDescriptor),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
    #[error("Action failed: {0}")]
    Action(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Parsing error: {0}")]
    Parse(String),
}

impl DirectoryError {
    /// Whether the error was reported by the data source itself,
    /// as opposed to a failure while reaching it or handling its reply.
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<ErrorDescriptor> for DirectoryError {
    fn from(value: ErrorDescriptor) -> Self {
        Self::Source(value)
    }
}
