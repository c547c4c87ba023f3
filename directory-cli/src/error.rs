use profile_directory::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't load configuration: {0}")]
    ConfigLoadError(String),

    #[error("Couldn't fetch the folder link: {0}")]
    LinkError(String),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    DirectoryError(#[from] DirectoryError),
}
