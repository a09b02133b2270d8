//! STK Manager - local yard server
//!
//! Serves the stock yard views (dashboard, entries, exits, performance and
//! billing) as a JSON API over a single file-backed record store.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::{RecordStorage, RecordStore};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod error;
mod handlers;
mod routes;
mod services;
mod storage;

pub use config::Config;

use crate::error::AppError;
use crate::storage::{shared_store, JsonFileStorage, SharedStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stk_server=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting STK Manager Server");
    tracing::info!("Environment: {}", config.environment);

    // Open the record store
    let file = JsonFileStorage::new(&config.storage.path);
    tracing::info!("Loading stock data from {}", file.path().display());
    let storage: Box<dyn RecordStorage + Send + Sync> = Box::new(file);
    let store = RecordStore::open(storage)?;

    // Create application state
    let state = AppState {
        store: shared_store(store),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = config
        .socket_addr()
        .map_err(|e| AppError::Configuration(format!("invalid server address: {}", e)))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "STK Manager API v1"
}
