//! Route-level tests against an in-process router.
//!
//! Run with: cargo test --package coldtons-web --test api_routes

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use coldtons_catalog::{CatalogCache, ObservationTable, PulsarCatalogue, Value};
use coldtons_common::Config;
use coldtons_web::router::build_router;
use coldtons_web::state::AppState;
use serde_json::{json, Value as Json};
use tower::ServiceExt;

const PSRCAT: &str = "\
#CATALOGUE 2.6.1
PSRJ     J0030+0451                                lnl+95
P0       0.00486545320296562           1.0e-16  abb+18
DM       4.332                         1.2e-3   abb+18
@-----------------------------------------------------------------
PSRJ     J0437-4715                                jlh+93
PSRB     B0435-47                                  mlt+93
P0       0.005757451936712637          3e-17    rhc+16
@-----------------------------------------------------------------
";

fn nicer_table() -> ObservationTable {
    ObservationTable::new(
        vec!["obsid".to_string(), "name".to_string(), "exposure".to_string()],
        vec![
            vec![Value::from("1060020101"), Value::from("J0030+0451"), Value::Float(1523.5)],
            vec![Value::from("1060020102"), Value::from("J0030+0451 "), Value::Float(f64::NAN)],
            vec![Value::from("1013010101"), Value::from("B0021-72C"), Value::Float(40.0)],
        ],
    )
}

fn app() -> Router {
    let config = Config::default();
    let nicer = CatalogCache::from_table(
        "nicermastr",
        nicer_table(),
        &config.heasarc.identifier_columns,
    )
    .unwrap();
    let atnf = PulsarCatalogue::parse(PSRCAT);
    build_router(AppState::new(config, nicer, atnf))
}

fn degraded_app() -> Router {
    let config = Config::default();
    build_router(AppState::new(config, CatalogCache::empty("nicermastr"), PulsarCatalogue::empty()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn post_json(uri: &str, body: Json) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "message": "ColDToNs API is running"}));
}

#[tokio::test]
async fn test_menu_config() {
    let (status, body) = get_json(app(), "/api/menu-config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["tools"][1]["id"], "period-analysis");
}

#[tokio::test]
async fn test_atnf_parameters() {
    let (status, body) = get_json(app(), "/api/atnf-parameters").await;
    assert_eq!(status, StatusCode::OK);
    let params = body.as_array().unwrap();
    assert_eq!(params.len(), 17);
    assert_eq!(params[0], "JNAME");
    assert_eq!(params[16], "EDOT");
}

#[tokio::test]
async fn test_nicer_status() {
    let (status, body) = get_json(app(), "/api/tools/nicer/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["identifier_column"], "name");
    assert_eq!(body["rows"], 3);
}

#[tokio::test]
async fn test_nicer_observations_found() {
    let (status, body) = get_json(app(), "/api/tools/nicer/observations?jname=J0030%2B0451").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(body["jname"], "J0030+0451");
    assert_eq!(body["count"], 2);
    assert_eq!(body["columns"], json!(["obsid", "name", "exposure"]));
    assert_eq!(body["observations"][0]["obsid"], "1060020101");
    // NaN never reaches the client
    assert_eq!(body["observations"][1]["exposure"], Json::Null);
}

#[tokio::test]
async fn test_nicer_observations_not_found_is_404() {
    let (status, body) = get_json(app(), "/api/tools/nicer/observations?jname=j0030%2B0451").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["available"], false);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_nicer_observations_blank_is_400() {
    let (status, body) = get_json(app(), "/api/tools/nicer/observations?jname=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, _) = get_json(app(), "/api/tools/nicer/observations").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_degraded_nicer_cache() {
    let (status, body) = get_json(degraded_app(), "/api/tools/nicer/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
    assert_eq!(body["count"], 0);

    let (status, _) = get_json(degraded_app(), "/api/tools/nicer/observations?jname=J0030%2B0451").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_atnf_data_query() {
    let req = post_json(
        "/api/tools/adtn-catalog/data",
        json!({"parameters": ["P0"], "pulsarNames": ["B0435-47"]}),
    );
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    let rows: Json = serde_json::from_slice(&body).unwrap();
    assert_eq!(rows, json!([{"JNAME": "J0437-4715", "P0": 0.005757451936712637}]));
}

#[tokio::test]
async fn test_atnf_data_unloaded_is_503() {
    let req = post_json("/api/tools/adtn-catalog/data", json!({}));
    let (status, _) = send(degraded_app(), req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_download_csv() {
    let req = post_json(
        "/api/tools/adtn-catalog/download",
        json!({
            "data": [{"JNAME": "J0030+0451", "P0": 0.004865}],
            "parameters": ["JNAME", "P0"],
            "format": "csv"
        }),
    );
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
    let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"atnf_catalog_"));
    assert!(disposition.ends_with(".csv\""));

    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(text.lines().collect::<Vec<_>>(), ["JNAME,P0", "J0030+0451,0.004865"]);
}

#[tokio::test]
async fn test_download_unsupported_format_is_400() {
    let req = post_json(
        "/api/tools/adtn-catalog/download",
        json!({"data": [], "parameters": [], "format": "xlsx"}),
    );
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Json = serde_json::from_slice(&body).unwrap();
    assert!(body["message"].as_str().unwrap().contains("xlsx"));
}
