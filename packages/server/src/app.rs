//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pricing::{AppSettings, PricingStore};

use crate::routes::{health_handler, history_handler, price_handler, settings};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Runtime settings, mutable via the settings endpoint. Each
    /// pricing request takes a snapshot and hands it to the pipeline
    /// explicitly.
    pub settings: Arc<RwLock<AppSettings>>,

    /// Cache + history store shared across requests.
    pub store: Arc<dyn PricingStore>,

    /// Label for the active store backend, reported by the health check.
    pub store_backend: &'static str,
}

impl AppState {
    pub fn new(settings: AppSettings, store: Arc<dyn PricingStore>, store_backend: &'static str) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            store,
            store_backend,
        }
    }
}

/// Build the axum application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/price", post(price_handler))
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::update_settings),
        )
        .route("/api/history", get(history_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
