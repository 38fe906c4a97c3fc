//! Configuration module for endpoint and cache-directory settings

use crate::error::{Result, RuesError};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Production RUES API host, used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://ruesapi.rues.org.co";

/// Default directory for cache files.
pub const DEFAULT_CACHE_DIR: &str = "public";

/// Client configuration, passed explicitly at construction time so tests can
/// substitute endpoints and directories without touching global state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub cache_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: &str, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RuesError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RuesError::Config(format!(
                "Base URL '{}' cannot carry endpoint paths",
                base_url
            )));
        }
        Ok(ClientConfig {
            base_url,
            cache_dir: cache_dir.into(),
        })
    }

    /// Reads `RUES_BASE_URL` and `RUES_CACHE_DIR`, falling back to the
    /// production defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("RUES_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let cache_dir =
            env::var("RUES_CACHE_DIR").unwrap_or_else(|_| DEFAULT_CACHE_DIR.to_string());
        Self::new(&base_url, cache_dir)
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| RuesError::Config(format!("Invalid endpoint path '{}': {}", path, e)))
    }
}
