use coldtons_common::ColdtonsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or service failure talking to an upstream catalog.
    #[error("Upstream unavailable: {0}")]
    Upstream(#[from] ColdtonsError),

    #[error("Upstream request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Malformed upstream response: {0}")]
    Malformed(String),

    #[error("Catalog {0} returned no rows")]
    EmptyResult(String),

    #[error("No identifier column among {candidates:?} (table has {columns:?})")]
    ColumnSchemaMismatch { candidates: Vec<String>, columns: Vec<String> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Upstream(ColdtonsError::Http(e))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
