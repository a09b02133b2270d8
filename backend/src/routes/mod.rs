//! Route definitions for the STK Manager server

use axum::{
    routing::{get, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/dashboard", dashboard_routes())
        .nest("/entries", entry_routes())
        .nest("/exits", exit_routes())
        .nest("/performance", performance_routes())
        .nest("/billing", billing_routes())
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_dashboard))
        .route("/groups/:field", get(handlers::get_dashboard_groups))
}

fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_entries).post(handlers::create_entry))
        .route(
            "/:id",
            get(handlers::get_entry).put(handlers::replace_entry),
        )
}

fn exit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_exits))
        .route("/:id", put(handlers::record_exit))
}

fn performance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_performance))
        .route("/:id", put(handlers::log_times))
}

fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_billing))
        .route("/:id", put(handlers::update_billing))
}
