use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use profile_directory::{RestSource, SourceConfig};

use crate::error::AppError;

pub fn provide_config(path: &Option<PathBuf>) -> Result<SourceConfig, AppError> {
    let config = match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            SourceConfig::load(path)
        }
        None => SourceConfig::from_env(),
    };
    config.map_err(|e| AppError::ConfigLoadError(e.to_string()))
}

pub fn provide_source(path: &Option<PathBuf>) -> Result<Arc<RestSource>, AppError> {
    let config = provide_config(path)?;
    Ok(Arc::new(RestSource::new(&config)?))
}
