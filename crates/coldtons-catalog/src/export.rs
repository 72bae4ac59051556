//! File export of query results (CSV / JSON downloads).

use chrono::{DateTime, Utc};
use serde_json::{Map, Value as Json};
use std::str::FromStr;

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    /// `atnf_catalog_2025-06-01T12-30-00.csv`
    pub fn file_name(self, at: DateTime<Utc>) -> String {
        format!("atnf_catalog_{}.{}", at.format("%Y-%m-%dT%H-%M-%S"), self.extension())
    }
}

/// Columns to export: `params` when given, otherwise every key in
/// first-seen order across the rows.
pub fn export_columns(rows: &[Map<String, Json>], params: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let source: Box<dyn Iterator<Item = &String>> = if params.is_empty() {
        Box::new(rows.iter().flat_map(|r| r.keys()))
    } else {
        Box::new(params.iter())
    };
    for column in source {
        if !columns.contains(column) {
            columns.push(column.clone());
        }
    }
    columns
}

/// Render rows in `format`, restricted to `params` (or all keys).
pub fn render(format: ExportFormat, rows: &[Map<String, Json>], params: &[String]) -> Result<Vec<u8>> {
    let columns = export_columns(rows, params);
    match format {
        ExportFormat::Csv => render_csv(rows, &columns),
        ExportFormat::Json => render_json(rows, &columns),
    }
}

fn cell_text(value: Option<&Json>) -> String {
    match value {
        None | Some(Json::Null) => String::new(),
        Some(Json::String(s)) => s.clone(),
        Some(Json::Number(n)) => n.to_string(),
        Some(Json::Bool(b)) => b.to_string(),
        Some(nested) => nested.to_string(),
    }
}

fn render_csv(rows: &[Map<String, Json>], columns: &[String]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let export_err = |e: csv::Error| CatalogError::Export(e.to_string());

    writer.write_record(columns).map_err(export_err)?;
    for row in rows {
        let record: Vec<String> = columns.iter().map(|c| cell_text(row.get(c))).collect();
        writer.write_record(&record).map_err(export_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| CatalogError::Export(e.to_string()))
}

fn render_json(rows: &[Map<String, Json>], columns: &[String]) -> Result<Vec<u8>> {
    let projected: Vec<Map<String, Json>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Json::Null)))
                .collect()
        })
        .collect();
    serde_json::to_vec_pretty(&projected).map_err(|e| CatalogError::Export(e.to_string()))
}
