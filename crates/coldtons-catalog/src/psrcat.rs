//! ATNF Pulsar Catalogue.
//!
//! Parses the `psrcat.db` text database:
//!
//! ```text
//! #CATALOGUE 2.6.1
//! PSRJ     J0030+0451                    lnl+95
//! RAJ      00:30:27.42836                3.0e-05  abb+18
//! P0       0.00486545320296562           1.0e-16  abb+18
//! @-----------------------------------------------------------------
//! ```
//!
//! One `KEY VALUE [ERROR] [REF]` per line; `@` lines end a record. Only the
//! value is kept. The `PSRJ`/`PSRB` designations are stored under their
//! query names `JNAME`/`BNAME`.

use std::collections::HashMap;
use std::path::Path;

use coldtons_common::sandbox::SandboxClient as Client;
use coldtons_common::{AtnfConfig, ColdtonsError};
use tracing::{info, instrument, warn};

use crate::error::{CatalogError, Result};
use crate::table::{ObservationTable, Value};

/// Parameters offered to the frontend's parameter picker.
pub const DEFAULT_PARAMETERS: [&str; 17] = [
    "JNAME", "RAJ", "DECJ", "P0", "DM", "F0", "F1", "GL", "GB",
    "S400", "S1400", "W50", "W10", "BINARY", "DIST", "AGE", "EDOT",
];

type Record = HashMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct PulsarCatalogue {
    version: Option<String>,
    records: Vec<Record>,
}

impl PulsarCatalogue {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        let mut version = None;
        let mut records = Vec::new();
        let mut current = Record::new();

        for line in text.lines() {
            let line = line.trim_end();
            if let Some(rest) = line.strip_prefix("#CATALOGUE") {
                version = Some(rest.trim().to_string());
                continue;
            }
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if line.starts_with('@') {
                finish_record(&mut records, &mut current);
                continue;
            }

            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            current.insert(canonical_key(key), Value::parse_loose(value));
        }
        finish_record(&mut records, &mut current);

        Self { version, records }
    }

    /// Load from the configured local file, or download when it is missing.
    /// Any failure yields the empty catalogue.
    #[instrument(skip(config))]
    pub async fn load(config: &AtnfConfig) -> Self {
        match Self::read_source(config).await {
            Ok(catalogue) if !catalogue.is_empty() => {
                info!(
                    pulsars = catalogue.len(),
                    version = catalogue.version().unwrap_or("unknown"),
                    "ATNF catalogue loaded"
                );
                catalogue
            }
            Ok(_) => {
                warn!("ATNF catalogue contained no pulsars, serving empty catalogue");
                Self::empty()
            }
            Err(e) => {
                warn!(error = %e, "ATNF catalogue unavailable, serving empty catalogue");
                Self::empty()
            }
        }
    }

    async fn read_source(config: &AtnfConfig) -> Result<Self> {
        let path = Path::new(&config.db_path);
        if path.exists() {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| CatalogError::Upstream(e.into()))?;
            return Ok(Self::parse(&text));
        }

        let Some(url) = config.db_url.as_deref() else {
            return Err(CatalogError::Upstream(ColdtonsError::Config(format!(
                "{} not found and no atnf.db_url configured",
                config.db_path
            ))));
        };

        let client = download_client(config)?;
        let resp = client.get(url)?.send().await?.error_for_status()?;
        let text = resp.text().await?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Select pulsars and parameters.
    ///
    /// `names` match JNAME or BNAME exactly after trimming; no names selects
    /// every pulsar. Columns are JNAME followed by `params` (upper-cased,
    /// deduplicated), or the default parameters when none are given.
    pub fn query(&self, params: &[String], names: &[String]) -> ObservationTable {
        let columns = output_columns(params);

        let wanted: Vec<&str> = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect();

        let rows = self
            .records
            .iter()
            .filter(|record| {
                wanted.is_empty()
                    || ["JNAME", "BNAME"].iter().any(|key| {
                        record
                            .get(*key)
                            .and_then(|v| v.as_identifier())
                            .is_some_and(|id| wanted.contains(&id.as_str()))
                    })
            })
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        ObservationTable::new(columns, rows)
    }
}

fn download_client(config: &AtnfConfig) -> Result<Client> {
    let mut client = Client::with_timeout(config.timeout())?;
    for host in &config.extra_hosts {
        client.allow_domain(host.trim());
    }
    Ok(client)
}

fn finish_record(records: &mut Vec<Record>, current: &mut Record) {
    if current.is_empty() {
        return;
    }
    let record = std::mem::take(current);
    if record.contains_key("JNAME") {
        records.push(record);
    }
}

fn canonical_key(key: &str) -> String {
    match key.to_ascii_uppercase().as_str() {
        "PSRJ" => "JNAME".to_string(),
        "PSRB" => "BNAME".to_string(),
        other => other.to_string(),
    }
}

fn output_columns(params: &[String]) -> Vec<String> {
    let mut columns = vec!["JNAME".to_string()];
    let requested: Vec<String> = if params.iter().all(|p| p.trim().is_empty()) {
        DEFAULT_PARAMETERS.iter().map(|p| p.to_string()).collect()
    } else {
        params.iter().map(|p| p.trim().to_ascii_uppercase()).collect()
    };
    for param in requested {
        if !param.is_empty() && !columns.contains(&param) {
            columns.push(param);
        }
    }
    columns
}
