//! Liveness check.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
}

/// GET /api/health
pub async fn health_check() -> Json<Health> {
    Json(Health {
        status: "healthy",
        message: "ColDToNs API is running",
    })
}
