use crate::models::UniversityCatalogEntry;
use crate::services::remote::RemoteCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading the university catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate shortName in catalog: {0}")]
    DuplicateShortName(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Unauthorized: invalid catalog API key")]
    Unauthorized,

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Catalog is empty")]
    Empty,
}

/// Where a catalog snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    Local,
    Remote,
    /// Remote was configured but failed, local data served instead
    LocalFallback,
}

/// Immutable view of the catalog handed to the engine for one request
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub entries: Arc<Vec<UniversityCatalogEntry>>,
    pub origin: CatalogOrigin,
}

impl CatalogSnapshot {
    /// Look up an entry by its stable key
    pub fn find_by_short_name(&self, short_name: &str) -> Option<&UniversityCatalogEntry> {
        self.entries.iter().find(|e| e.short_name == short_name)
    }
}

/// A source of university catalog records
///
/// Every implementation returns the same record shape regardless of origin.
pub trait CatalogProvider: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<CatalogSnapshot, CatalogError>> + Send;
}

/// Reject catalogs whose `shortName` keys are not unique
pub fn validate_catalog(entries: &[UniversityCatalogEntry]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.short_name.as_str()) {
            return Err(CatalogError::DuplicateShortName(entry.short_name.clone()));
        }
    }
    Ok(())
}

/// Catalog bundled with the service as a JSON file
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    entries: Arc<Vec<UniversityCatalogEntry>>,
}

impl LocalCatalog {
    /// Load and validate a JSON array of catalog entries from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let entries: Vec<UniversityCatalogEntry> = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded {} universities from {}", entries.len(), path.as_ref().display());
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<UniversityCatalogEntry>) -> Result<Self, CatalogError> {
        validate_catalog(&entries)?;
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn snapshot(&self, origin: CatalogOrigin) -> CatalogSnapshot {
        CatalogSnapshot {
            entries: Arc::clone(&self.entries),
            origin,
        }
    }
}

impl CatalogProvider for LocalCatalog {
    async fn fetch(&self) -> Result<CatalogSnapshot, CatalogError> {
        Ok(self.snapshot(CatalogOrigin::Local))
    }
}

/// Catalog source selected at startup
///
/// With a remote configured, remote failures are logged and the local catalog
/// is served in its place.
pub enum CatalogSource {
    Local(LocalCatalog),
    RemoteWithFallback {
        remote: RemoteCatalog,
        fallback: LocalCatalog,
    },
}

impl CatalogProvider for CatalogSource {
    async fn fetch(&self) -> Result<CatalogSnapshot, CatalogError> {
        match self {
            CatalogSource::Local(local) => local.fetch().await,
            CatalogSource::RemoteWithFallback { remote, fallback } => {
                match remote.fetch().await {
                    Ok(snapshot) => Ok(snapshot),
                    Err(e) => {
                        tracing::warn!("Remote catalog unavailable, serving local data: {}", e);
                        Ok(fallback.snapshot(CatalogOrigin::LocalFallback))
                    }
                }
            }
        }
    }
}
