use serde::{Deserialize, Serialize};
use crate::models::domain::{RecommendationResult, UniversityCatalogEntry};
use crate::services::CatalogOrigin;

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendationResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "programFilterRelaxed")]
    pub program_filter_relaxed: bool,
    #[serde(rename = "eligibilityRelaxed")]
    pub eligibility_relaxed: bool,
    #[serde(rename = "catalogOrigin")]
    pub catalog_origin: CatalogOrigin,
}

/// Response for the catalog listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversitiesResponse {
    pub universities: Vec<UniversityCatalogEntry>,
    pub total: usize,
    pub origin: CatalogOrigin,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
