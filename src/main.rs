mod activity;
mod catalog;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod search;
mod templates;
#[cfg(test)]
mod testutil;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    activity::ActivityLog, catalog::CatalogStore, config::Config, search::SearchOrchestrator,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: CatalogStore,
    pub activity: ActivityLog,
    pub orchestrator: SearchOrchestrator,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,cinescope=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let catalog_db = db::connect_catalog(&config.catalog_database_url).await?;
    let catalog = CatalogStore::new(catalog_db, config.page_size);

    // The activity log handle is opened once here and shared by every
    // request for its lifetime.
    let activity_db = db::connect_activity_log(&config.activity_log_database_url).await?;
    let activity = ActivityLog::new(activity_db);

    let orchestrator = SearchOrchestrator::new(catalog.clone(), activity.clone());

    let state = Arc::new(AppState { config: config.clone(), catalog, activity, orchestrator });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/search", get(routes::search))
        .route("/movie/{film_id}", get(routes::movie_detail))
        .route("/stats", get(routes::stats))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
