//! Disk-backed establishment lookup
//!
//! Convenience path for callers that want the active establishments of a tax
//! id as a flat list, persisted so repeat lookups skip the network entirely.
//!
//! # Cache structure
//!
//! Lists live at `<cache_dir>/establishments/<taxId>.json` as a JSON array of
//! `{name, chamber, registry}` rows. A file, once written, is returned
//! verbatim on later lookups: there is no freshness check, no invalidation
//! and no schema versioning. Concurrent lookups for the same tax id may race
//! on the file; the last writer wins.

use crate::config::ClientConfig;
use crate::error::{Result, RuesError};
use crate::logging::Logger;
use crate::registration::RegistrationId;
use crate::registry::client::RuesClient;
use crate::registry::transport::{HttpTransport, RuesTransport};
use crate::registry::types::{Establishment, SearchQuery};
use std::path::PathBuf;
use std::sync::Arc;

const CACHE_SUBDIR: &str = "establishments";

/// Disk-backed lookup of active establishments by tax id.
pub struct EstablishmentCache {
    config: ClientConfig,
    transport: Arc<dyn RuesTransport>,
    logger: Logger,
}

impl EstablishmentCache {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn RuesTransport>) -> Self {
        Self {
            config,
            transport,
            logger: Logger::default(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Path of the cache file for a tax id.
    pub fn cache_path(&self, tax_id: u64) -> PathBuf {
        self.config
            .cache_dir
            .join(CACHE_SUBDIR)
            .join(format!("{}.json", tax_id))
    }

    /// Returns the active establishments registered under `tax_id`.
    ///
    /// Serves the cache file when one exists and parses; otherwise fetches
    /// (acquiring a token when none is supplied), filters to records whose
    /// standing is exactly `"ACTIVA"`, persists the projection and returns
    /// it. A tax id with no registration yields an empty list, not an error.
    pub async fn lookup(&self, tax_id: u64, token: Option<&str>) -> Result<Vec<Establishment>> {
        if let Some(cached) = self.read_cached(tax_id).await {
            self.logger
                .verbose(&format!("Cache hit for NIT {}", tax_id));
            return Ok(cached);
        }

        let token = match token {
            Some(token) => token.to_string(),
            None => {
                RuesClient::fetch_token_with(self.transport.as_ref(), &self.config, &self.logger)
                    .await?
                    .data
                    .token
            }
        };

        let client = RuesClient::builder(self.config.clone())
            .with_token(Some(token))
            .with_transport(Arc::clone(&self.transport))
            .with_logger(self.logger.clone())
            .build()?;

        let search = client.search(&SearchQuery::TaxId(tax_id)).await?;
        let Some(registration_id) = search.data.first_registration_id() else {
            self.logger
                .verbose(&format!("No registration found for NIT {}", tax_id));
            return Ok(Vec::new());
        };

        let id = RegistrationId::decompose(registration_id);
        let response = client.establishments(&id).await?;

        let establishments: Vec<Establishment> = response
            .data
            .registros
            .unwrap_or_default()
            .iter()
            .filter(|record| record.is_active())
            .map(|record| record.to_establishment())
            .collect();

        // The cache is an optimization; a failed write must not lose the data
        // we already fetched.
        if let Err(err) = self.write_cached(tax_id, &establishments).await {
            self.logger
                .warning(&format!("Failed to write cache file: {}", err));
        }

        Ok(establishments)
    }

    /// Reads and parses the cache file. Any trouble (absent file, bad JSON)
    /// is a miss, never an error.
    async fn read_cached(&self, tax_id: u64) -> Option<Vec<Establishment>> {
        let path = self.cache_path(tax_id);
        let bytes = tokio::fs::read(&path).await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    async fn write_cached(&self, tax_id: u64, establishments: &[Establishment]) -> Result<()> {
        let path = self.cache_path(tax_id);
        let dir = path.parent().ok_or_else(|| RuesError::Cache {
            message: "Cache path has no parent directory".to_string(),
            path: Some(path.clone()),
        })?;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| RuesError::Cache {
                message: format!("Failed to create cache directory: {}", e),
                path: Some(dir.to_path_buf()),
            })?;
        let json = serde_json::to_string_pretty(establishments)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| RuesError::Cache {
                message: format!("Failed to write cache file: {}", e),
                path: Some(path.clone()),
            })?;
        self.logger
            .detail(&format!("Cached {} establishments at {}", establishments.len(), path.display()));
        Ok(())
    }
}
