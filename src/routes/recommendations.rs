use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::RecommendationSettings;
use crate::core::{EngineError, Recommender};
use crate::models::{
    ErrorResponse, HealthResponse, RecommendationRequest, RecommendationsResponse, StudentProfile,
};
use crate::services::{CatalogProvider, CatalogSource};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogSource>,
    pub recommender: Recommender,
    pub limits: RecommendationSettings,
}

/// Configure recommendation and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "matricMarks": 1000,
///   "matricTotal": 1200,
///   "interMarks": 950,
///   "interTotal": 1200,
///   "entryTestScore": 150,
///   "entryTestTotal": 200,
///   "preferredPrograms": ["Engineering"],
///   "preferredCities": ["Lahore"],
///   "universityType": "Both",
///   "limit": 10
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let profile = StudentProfile::from(&*req);
    let limit = req
        .limit
        .unwrap_or(state.limits.default_limit)
        .min(state.limits.max_limit) as usize;

    let snapshot = match state.catalog.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load catalog: {}", e);
            return HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "Catalog unavailable".to_string(),
                message: e.to_string(),
                status_code: 503,
            });
        }
    };

    let outcome = match state.recommender.recommend(&snapshot.entries, &profile) {
        Ok(outcome) => outcome,
        Err(EngineError::InvalidInput(message)) => {
            tracing::info!("Rejected recommendation request: {}", message);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid input".to_string(),
                message,
                status_code: 400,
            });
        }
    };

    tracing::info!(
        "Returning {} of {} recommendations (catalog: {} entries, {:?}, program relaxed: {}, eligibility relaxed: {})",
        outcome.recommendations.len().min(limit),
        outcome.recommendations.len(),
        outcome.total_candidates,
        snapshot.origin,
        outcome.program_relaxed,
        outcome.eligibility_relaxed
    );

    let mut recommendations = outcome.recommendations;
    recommendations.truncate(limit);

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations,
        total_candidates: outcome.total_candidates,
        program_filter_relaxed: outcome.program_relaxed,
        eligibility_relaxed: outcome.eligibility_relaxed,
        catalog_origin: snapshot.origin,
    })
}
