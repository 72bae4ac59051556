//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    system::health_check,
    menu::get_menu_config,
    atnf::{get_atnf_parameters, adtn_catalog_data, adtn_catalog_download},
    nicer::{nicer_status, nicer_observations},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let shared: SharedState = Arc::new(state);

    let router = Router::new()
        .route("/api/health",         get(health_check))
        .route("/api/menu-config",    get(get_menu_config))
        .route("/api/atnf-parameters", get(get_atnf_parameters))

        // Tool endpoints
        .route("/api/tools/adtn-catalog/data",     post(adtn_catalog_data))
        .route("/api/tools/adtn-catalog/download", post(adtn_catalog_download))
        .route("/api/tools/nicer/status",          get(nicer_status))
        .route("/api/tools/nicer/observations",    get(nicer_observations));

    // Built frontend
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
