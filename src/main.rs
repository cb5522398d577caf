use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use unimatch::config::{LoggingSettings, Settings};
use unimatch::core::Recommender;
use unimatch::models::{AcademicPolicy, ScoringWeights};
use unimatch::routes::{self, handle_json_payload_error, AppState};
use unimatch::services::{CatalogSource, LocalCatalog, RemoteCatalog};

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);
    info!("Starting Unimatch recommendation service...");

    let local = LocalCatalog::from_path(&settings.catalog.local_path)
        .map_err(|e| startup_error("Failed to load local catalog", e))?;
    info!("Local catalog loaded ({} universities)", local.len());

    let catalog = match &settings.catalog.remote {
        Some(remote) => {
            let client = RemoteCatalog::new(
                remote.endpoint.clone(),
                remote.api_key.clone(),
                remote.timeout_secs,
                remote.cache_ttl_secs,
            )
            .map_err(|e| startup_error("Failed to create remote catalog client", e))?;
            info!("Remote catalog enabled at {} (TTL: {}s)", remote.endpoint, remote.cache_ttl_secs);
            CatalogSource::RemoteWithFallback {
                remote: client,
                fallback: local,
            }
        }
        None => CatalogSource::Local(local),
    };

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let policy = AcademicPolicy::from(&settings.scoring.academic);
    let recommender = Recommender::new(weights, policy);

    info!("Recommender initialized with weights: {:?}", weights);

    let app_state = AppState {
        catalog: Arc::new(catalog),
        recommender,
        limits: settings.recommendations.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
