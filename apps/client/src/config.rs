use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:4000/graphql";

/// Client settings read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub storage_path: PathBuf,
    pub rust_log: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let storage_path = match env::var("TRACKER_STORAGE_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_storage_path()
                .context("Could not determine a config directory; set TRACKER_STORAGE_PATH")?,
        };

        Ok(Self {
            api_url: env::var("TRACKER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            storage_path,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// Applies the `--api-url` flag, which wins over the environment.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }
}

/// `<config dir>/job-tracker/storage.json`
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("job-tracker").join("storage.json"))
}
