use crate::models::UniversityCatalogEntry;
use crate::services::catalog::{
    validate_catalog, CatalogError, CatalogOrigin, CatalogProvider, CatalogSnapshot,
};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const SNAPSHOT_KEY: &str = "universities";

/// HTTP client for a remotely hosted university catalog
///
/// Fetched snapshots are cached for `ttl_secs` so that per-request calls do
/// not hit the backend every time.
pub struct RemoteCatalog {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    cache: moka::future::Cache<String, Arc<Vec<UniversityCatalogEntry>>>,
}

impl RemoteCatalog {
    /// Create a new remote catalog client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout_secs: u64,
        ttl_secs: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            base_url,
            api_key,
            client,
            cache,
        })
    }

    fn universities_url(&self) -> String {
        format!("{}/universities", self.base_url.trim_end_matches('/'))
    }

    /// Drop the cached snapshot so the next fetch goes to the backend
    pub async fn invalidate(&self) {
        self.cache.invalidate(SNAPSHOT_KEY).await;
    }

    async fn fetch_entries(&self) -> Result<Vec<UniversityCatalogEntry>, CatalogError> {
        let url = self.universities_url();
        tracing::debug!("Fetching remote catalog from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }
        let response = request.send().await?;

        match response.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(CatalogError::Unauthorized);
            }
            status => {
                return Err(CatalogError::ApiError(format!(
                    "Failed to fetch catalog: {}",
                    status
                )));
            }
        }

        let json: Value = response.json().await?;
        parse_documents(json)
    }
}

/// Accept either a bare array or a `{ "documents": [...] }` envelope
///
/// Documents that do not parse are skipped with a warning.
pub fn parse_documents(json: Value) -> Result<Vec<UniversityCatalogEntry>, CatalogError> {
    let documents = match json {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("documents") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CatalogError::InvalidResponse("Missing documents array".into()));
            }
        },
        _ => {
            return Err(CatalogError::InvalidResponse("Expected array or object".into()));
        }
    };

    let total = documents.len();
    let entries: Vec<UniversityCatalogEntry> = documents
        .into_iter()
        .filter_map(|doc| {
            let data = match doc {
                Value::Object(mut obj) if obj.contains_key("data") => {
                    obj.remove("data").unwrap_or(Value::Null)
                }
                other => other,
            };
            match serde_json::from_value(data) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping malformed catalog document: {}", e);
                    None
                }
            }
        })
        .collect();

    tracing::debug!("Parsed {} of {} remote catalog documents", entries.len(), total);

    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }
    validate_catalog(&entries)?;
    Ok(entries)
}

impl CatalogProvider for RemoteCatalog {
    async fn fetch(&self) -> Result<CatalogSnapshot, CatalogError> {
        if let Some(entries) = self.cache.get(SNAPSHOT_KEY).await {
            tracing::trace!("Remote catalog cache hit");
            return Ok(CatalogSnapshot {
                entries,
                origin: CatalogOrigin::Remote,
            });
        }

        let entries = Arc::new(self.fetch_entries().await?);
        self.cache
            .insert(SNAPSHOT_KEY.to_string(), Arc::clone(&entries))
            .await;

        tracing::info!("Remote catalog refreshed ({} universities)", entries.len());

        Ok(CatalogSnapshot {
            entries,
            origin: CatalogOrigin::Remote,
        })
    }
}
