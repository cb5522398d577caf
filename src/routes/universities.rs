use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, UniversitiesResponse};
use crate::routes::AppState;
use crate::services::{CatalogProvider, CatalogSnapshot};

/// Configure catalog browsing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/universities", web::get().to(list_universities))
        .route("/universities/{short_name}", web::get().to(get_university));
}

fn catalog_unavailable(e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("Failed to load catalog: {}", e);
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "Catalog unavailable".to_string(),
        message: e.to_string(),
        status_code: 503,
    })
}

async fn load(state: &AppState) -> Result<CatalogSnapshot, HttpResponse> {
    state.catalog.fetch().await.map_err(catalog_unavailable)
}

/// GET /api/v1/universities
async fn list_universities(state: web::Data<AppState>) -> impl Responder {
    let snapshot = match load(&state).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    HttpResponse::Ok().json(UniversitiesResponse {
        total: snapshot.entries.len(),
        universities: (*snapshot.entries).clone(),
        origin: snapshot.origin,
    })
}

/// GET /api/v1/universities/{short_name}
///
/// Detail lookup keyed by `shortName`.
async fn get_university(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let short_name = path.into_inner();
    let snapshot = match load(&state).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match snapshot.find_by_short_name(&short_name) {
        Some(entry) => HttpResponse::Ok().json(entry),
        None => {
            tracing::debug!("University not found: {}", short_name);
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message: format!("No university with shortName {}", short_name),
                status_code: 404,
            })
        }
    }
}
