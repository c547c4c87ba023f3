use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{DirectoryError, Result};

pub const URL_VAR: &str = "DIRECTORY_URL";
pub const API_KEY_VAR: &str = "DIRECTORY_API_KEY";

/// Where the backing store lives and how to authenticate to it.
///
/// Loaded from a JSON file:
/// ```json
/// { "url": "https://project.example.com", "api_key": "..." }
/// ```
/// or from the `DIRECTORY_URL` and `DIRECTORY_API_KEY` variables.
#[derive(Clone, Deserialize)]
pub struct SourceConfig {
    pub url: Url,
    pub api_key: String,
}

impl SourceConfig {
    pub fn new(url: Url, api_key: String) -> Self {
        Self { url, api_key }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: SourceConfig = serde_json::from_str(&text)?;
        config.validate()
    }

    pub fn from_env() -> Result<Self> {
        let url = env::var(URL_VAR).map_err(|_| {
            DirectoryError::Config(format!("{} is not set", URL_VAR))
        })?;
        let api_key = env::var(API_KEY_VAR).map_err(|_| {
            DirectoryError::Config(format!("{} is not set", API_KEY_VAR))
        })?;

        Self::new(Url::parse(&url)?, api_key).validate()
    }

    fn validate(self) -> Result<Self> {
        if self.api_key.trim().is_empty() {
            return Err(DirectoryError::Config("api key is empty".to_string()));
        }
        if self.url.cannot_be_a_base() {
            return Err(DirectoryError::Config(format!(
                "{} cannot be used as a base url",
                self.url
            )));
        }
        Ok(self)
    }
}

// Keeps the key out of logs.
impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}
