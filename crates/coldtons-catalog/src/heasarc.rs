//! HEASARC TAP client.
//!
//! Endpoint: https://heasarc.gsfc.nasa.gov/xamin/vo/tap/sync
//!
//! An all-sky query is a plain `SELECT * FROM <catalog>`; no spatial
//! constraint is added to the ADQL.

use async_trait::async_trait;
use coldtons_common::sandbox::SandboxClient as Client;
use coldtons_common::HeasarcConfig;
use tracing::{debug, instrument};

use crate::error::{CatalogError, Result};
use crate::table::ObservationTable;
use crate::votable::parse_votable;

/// An upstream that can return every row of one catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Catalog name, for logs and status.
    fn name(&self) -> &str;

    /// Fetch all rows of the catalog across the full sky.
    async fn fetch_all_sky(&self) -> Result<ObservationTable>;
}

pub struct HeasarcClient {
    client: Client,
    tap_url: String,
    catalog: String,
    maxrec: Option<u64>,
}

impl HeasarcClient {
    pub fn new(config: &HeasarcConfig) -> Result<Self> {
        Ok(Self {
            client: Client::with_timeout(config.timeout())?,
            tap_url: config.tap_url.clone(),
            catalog: config.catalog.clone(),
            maxrec: config.maxrec,
        })
    }

    /// ADQL for an all-sky query of this client's catalog.
    pub fn all_sky_adql(&self) -> String {
        format!("SELECT * FROM {}", self.catalog)
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("REQUEST", "doQuery".to_string()),
            ("LANG", "ADQL".to_string()),
            ("FORMAT", "votable".to_string()),
            ("QUERY", self.all_sky_adql()),
        ];
        if let Some(maxrec) = self.maxrec {
            params.push(("MAXREC", maxrec.to_string()));
        }
        params
    }
}

#[async_trait]
impl CatalogSource for HeasarcClient {
    fn name(&self) -> &str {
        &self.catalog
    }

    #[instrument(skip(self), fields(catalog = %self.catalog))]
    async fn fetch_all_sky(&self) -> Result<ObservationTable> {
        let resp = self.client
            .post(&self.tap_url)?
            .form(&self.query_params())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(CatalogError::Malformed(format!(
                "HEASARC TAP returned HTTP {}",
                status
            )));
        }

        let table = parse_votable(&body)?;
        debug!(rows = table.len(), columns = table.columns().len(), "HEASARC query returned");
        Ok(table)
    }
}
