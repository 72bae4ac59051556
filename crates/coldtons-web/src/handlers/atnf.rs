//! ATNF pulsar catalogue endpoints.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use coldtons_catalog::export::{self, ExportFormat};
use coldtons_catalog::psrcat::DEFAULT_PARAMETERS;
use coldtons_catalog::ObservationTable;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct AtnfQuery {
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default, rename = "pulsarNames")]
    pub pulsar_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub parameters: Vec<String>,
    pub format: String,
}

/// GET /api/atnf-parameters
pub async fn get_atnf_parameters() -> Json<&'static [&'static str]> {
    Json(&DEFAULT_PARAMETERS)
}

/// POST /api/tools/adtn-catalog/data
pub async fn adtn_catalog_data(
    State(state): State<SharedState>,
    Json(query): Json<AtnfQuery>,
) -> Result<Json<ObservationTable>, ApiError> {
    if state.atnf.is_empty() {
        return Err(ApiError::Unavailable("ATNF catalogue is not loaded".to_string()));
    }
    let table = state.atnf.query(&query.parameters, &query.pulsar_names);
    debug!(
        params = query.parameters.len(),
        names = query.pulsar_names.len(),
        rows = table.len(),
        "ATNF query"
    );
    Ok(Json(table))
}

/// POST /api/tools/adtn-catalog/download
pub async fn adtn_catalog_download(
    Json(req): Json<DownloadRequest>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = req.format.parse()?;
    let body = export::render(format, &req.data, &req.parameters)?;
    let disposition = format!("attachment; filename=\"{}\"", format.file_name(Utc::now()));

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
