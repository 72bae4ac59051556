//! In-memory catalog cache with identifier lookups.
//!
//! Built once at startup from a [`CatalogSource`]. Any upstream failure
//! (error, timeout, empty result, no identifier column) leaves the cache in
//! its empty state instead of failing startup. After construction the cache
//! is read-only, so it is shared across handlers behind an `Arc` without
//! locking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{CatalogError, Result};
use crate::heasarc::CatalogSource;
use crate::table::{ObservationTable, Row};

/// Timeout and retry policy around the startup fetch.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            retries: 1,
            backoff: Duration::from_secs(2),
        }
    }
}

/// Snapshot of cache availability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub available: bool,
    pub count: usize,
    pub catalog: String,
    pub identifier_column: Option<String>,
    pub rows: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Result of a well-formed lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    NotAvailable {
        identifier: String,
    },
    Found {
        identifier: String,
        rows: Vec<&'a Row>,
        columns: &'a [String],
    },
}

impl Lookup<'_> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CatalogCache {
    catalog: String,
    table: ObservationTable,
    identifier_column: Option<String>,
    index: HashSet<String>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CatalogCache {
    /// The degraded state: nothing cached, every lookup is not-available.
    pub fn empty(catalog: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
            table: ObservationTable::empty(),
            identifier_column: None,
            index: HashSet::new(),
            loaded_at: None,
        }
    }

    /// Index an already-fetched table.
    ///
    /// The identifier column is the first alias (ASCII case-insensitive) that
    /// names a column of the table.
    pub fn from_table(
        catalog: impl Into<String>,
        table: ObservationTable,
        aliases: &[String],
    ) -> Result<Self> {
        let catalog = catalog.into();
        if table.is_empty() {
            return Err(CatalogError::EmptyResult(catalog));
        }

        let (column_idx, column) = resolve_identifier_column(table.columns(), aliases)
            .ok_or_else(|| CatalogError::ColumnSchemaMismatch {
                candidates: aliases.to_vec(),
                columns: table.columns().to_vec(),
            })?;

        let index: HashSet<String> = table
            .rows()
            .iter()
            .filter_map(|row| row.value_at(column_idx).and_then(|v| v.as_identifier()))
            .collect();

        Ok(Self {
            catalog,
            table,
            identifier_column: Some(column),
            index,
            loaded_at: Some(Utc::now()),
        })
    }

    /// Fetch from `source` under `policy` and index the result, degrading to
    /// the empty state on any failure. Never returns an error.
    pub async fn build(
        source: &dyn CatalogSource,
        aliases: &[String],
        policy: &FetchPolicy,
    ) -> Self {
        let catalog = source.name().to_string();
        info!(catalog = %catalog, "Building catalog cache");

        let outcome = match fetch_with_retry(source, policy).await {
            Ok(table) => Self::from_table(catalog.clone(), table, aliases),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(cache) => {
                info!(
                    catalog = %catalog,
                    rows = cache.table.len(),
                    identifiers = cache.index.len(),
                    column = cache.identifier_column.as_deref().unwrap_or_default(),
                    "Catalog cache ready"
                );
                cache
            }
            Err(e) => {
                warn!(catalog = %catalog, error = %e, "Catalog unavailable, serving empty cache");
                Self::empty(catalog)
            }
        }
    }

    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            available: !self.index.is_empty(),
            count: self.index.len(),
            catalog: self.catalog.clone(),
            identifier_column: self.identifier_column.clone(),
            rows: self.table.len(),
            loaded_at: self.loaded_at,
        }
    }

    /// Look up every row whose identifier matches `identifier` after trimming.
    /// Matching is case-sensitive. Blank input is `InvalidInput`.
    pub fn lookup(&self, identifier: &str) -> Result<Lookup<'_>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(CatalogError::InvalidInput("identifier must not be empty".to_string()));
        }

        let column_idx = self
            .identifier_column
            .as_deref()
            .and_then(|c| self.table.column_index(c));

        let (true, Some(column_idx)) = (self.index.contains(identifier), column_idx) else {
            return Ok(Lookup::NotAvailable { identifier: identifier.to_string() });
        };

        let rows = self
            .table
            .rows()
            .iter()
            .filter(|row| {
                row.value_at(column_idx)
                    .and_then(|v| v.as_identifier())
                    .is_some_and(|v| v == identifier)
            })
            .collect();

        Ok(Lookup::Found {
            identifier: identifier.to_string(),
            rows,
            columns: self.table.columns(),
        })
    }

    pub fn identifier_column(&self) -> Option<&str> {
        self.identifier_column.as_deref()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.index.iter().map(String::as_str)
    }

    pub fn table(&self) -> &ObservationTable {
        &self.table
    }
}

fn resolve_identifier_column(columns: &[String], aliases: &[String]) -> Option<(usize, String)> {
    aliases.iter().find_map(|alias| {
        columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(alias))
            .map(|idx| (idx, columns[idx].clone()))
    })
}

async fn fetch_with_retry(
    source: &dyn CatalogSource,
    policy: &FetchPolicy,
) -> Result<ObservationTable> {
    let mut backoff = policy.backoff;
    let mut attempt = 0;
    loop {
        let result = match tokio::time::timeout(policy.timeout, source.fetch_all_sky()).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout(policy.timeout)),
        };

        match result {
            Ok(table) => return Ok(table),
            Err(e) if attempt < policy.retries => {
                attempt += 1;
                warn!(
                    catalog = source.name(),
                    attempt,
                    error = %e,
                    "Catalog fetch failed, retrying in {:?}", backoff
                );
                tokio::time::sleep(backoff).await;
                backoff = next_backoff(backoff);
            }
            Err(e) => return Err(e),
        }
    }
}

fn next_backoff(backoff: Duration) -> Duration {
    backoff.saturating_mul(2)
}
