//! NICER observation availability, backed by the startup catalog cache.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coldtons_catalog::{CacheStatus, Lookup, Row};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ObservationQuery {
    pub jname: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ObservationsResponse<'a> {
    pub available: bool,
    pub jname: String,
    pub count: usize,
    pub columns: &'a [String],
    pub observations: Vec<&'a Row>,
}

/// GET /api/tools/nicer/status
pub async fn nicer_status(State(state): State<SharedState>) -> Json<CacheStatus> {
    Json(state.nicer.status())
}

/// GET /api/tools/nicer/observations?jname=J0030%2B0451
///
/// 200 with rows when the pulsar has NICER observations, 404 when it has
/// none, 400 when `jname` is missing or blank.
pub async fn nicer_observations(
    State(state): State<SharedState>,
    Query(query): Query<ObservationQuery>,
) -> Result<Response, ApiError> {
    let jname = query.jname.unwrap_or_default();

    let response = match state.nicer.lookup(&jname)? {
        Lookup::Found { identifier, rows, columns } => Json(ObservationsResponse {
            available: true,
            jname: identifier,
            count: rows.len(),
            columns,
            observations: rows,
        })
        .into_response(),
        Lookup::NotAvailable { identifier } => (
            StatusCode::NOT_FOUND,
            Json(ObservationsResponse {
                available: false,
                jname: identifier,
                count: 0,
                columns: &[],
                observations: Vec::new(),
            }),
        )
            .into_response(),
    };
    Ok(response)
}
