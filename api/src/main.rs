//! Activity-to-Atom feed bridge
//!
//! Periodically fetches public activity feeds from a social network's JSON
//! API, stores each snapshot, and republishes the latest one as Atom.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod transcode;

#[cfg(test)]
mod test_utils;


use adapters::{ActivityClientImpl, PostgresFetchStore};
use app::{FetchService, RefreshScheduler};
use config::Config;
use domain::ports::{ActivityClient, FetchStore};

/// Fetch service over whichever store and client the process was wired with
pub type DynFetchService = FetchService<dyn FetchStore, dyn ActivityClient>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub fetch_service: Arc<DynFetchService>,
    /// Feeds fetched by `/feed/cron`
    pub feed_ids: Arc<Vec<String>>,
    pub recent_limit: u64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes and middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(handlers::front_page))
        .route("/feed/", get(handlers::front_page))
        .route("/feed/cron", get(handlers::run_cron))
        .route("/feed/:id", get(handlers::get_feed))
        .route("/feed/:id/raw", get(handlers::get_raw))
        .route("/feed/:id/preview", get(handlers::get_preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,activity_atom_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting activity feed bridge...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configured feeds: {}", config.feed_ids.join(", "));

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    // Create adapters
    let store = PostgresFetchStore::new(db);
    store.ensure_schema().await?;
    let store: Arc<dyn FetchStore> = Arc::new(store);

    let client: Arc<dyn ActivityClient> = Arc::new(ActivityClientImpl::new(
        config.activity_api_url.clone(),
        config.activity_api_key.clone(),
    ));

    // Create application services
    let fetch_service: Arc<DynFetchService> = Arc::new(FetchService::new(store, client));

    // Optional in-process refresh loop
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = if config.refresh_enabled() {
        let scheduler = RefreshScheduler::new(
            fetch_service.clone(),
            config.feed_ids.clone(),
            Duration::from_secs(config.refresh_interval_secs),
        );
        Some(tokio::spawn(scheduler.run(shutdown_rx)))
    } else {
        tracing::info!("Refresh loop disabled (REFRESH_INTERVAL_SECS = 0)");
        None
    };

    // Create app state
    let state = AppState {
        fetch_service,
        feed_ids: Arc::new(config.feed_ids.clone()),
        recent_limit: config.recent_limit,
    };

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = scheduler {
        handle.await?;
    }

    Ok(())
}
