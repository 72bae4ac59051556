//! Configuration loading for ColDToNs.
//! Reads coldtons.toml from the current directory or path in COLDTONS_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ColdtonsError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub heasarc: HeasarcConfig,
    #[serde(default)]
    pub atnf: AtnfConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Built frontend served for any path the API does not claim.
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), static_dir: None }
    }
}

fn default_bind() -> String { "127.0.0.1:5000".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeasarcConfig {
    #[serde(default = "default_tap_url")]
    pub tap_url: String,
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default = "default_spatial")]
    pub spatial: String,
    /// Candidate identifier columns, tried in order.
    #[serde(default = "default_identifier_columns")]
    pub identifier_columns: Vec<String>,
    pub maxrec: Option<u64>,
    #[serde(default = "default_heasarc_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for HeasarcConfig {
    fn default() -> Self {
        Self {
            tap_url: default_tap_url(),
            catalog: default_catalog(),
            spatial: default_spatial(),
            identifier_columns: default_identifier_columns(),
            maxrec: None,
            timeout_secs: default_heasarc_timeout(),
            retries: default_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl HeasarcConfig {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
    pub fn backoff(&self) -> Duration { Duration::from_millis(self.backoff_ms) }
}

fn default_tap_url()           -> String { "https://heasarc.gsfc.nasa.gov/xamin/vo/tap/sync".to_string() }
fn default_catalog()           -> String { "nicermastr".to_string() }
fn default_spatial()           -> String { "all-sky".to_string() }
fn default_heasarc_timeout()   -> u64    { 60 }
fn default_retries()           -> u32    { 1 }

const MAX_RETRIES: u32 = 10;
fn default_backoff_ms()        -> u64    { 2_000 }

fn default_identifier_columns() -> Vec<String> {
    ["jname", "name", "target_name", "obj_name", "object", "source_name"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtnfConfig {
    /// Local psrcat.db, read when present.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Plain-text psrcat.db download, used when the local file is missing.
    pub db_url: Option<String>,
    /// Hosts besides www.atnf.csiro.au that `db_url` may point at.
    #[serde(default)]
    pub extra_hosts: Vec<String>,
    #[serde(default = "default_atnf_timeout")]
    pub timeout_secs: u64,
}

impl Default for AtnfConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            db_url: None,
            extra_hosts: Vec::new(),
            timeout_secs: default_atnf_timeout(),
        }
    }
}

impl AtnfConfig {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

fn default_db_path()      -> String { "data/psrcat.db".to_string() }
fn default_atnf_timeout() -> u64    { 60 }

mod tests;

impl Config {
    /// Load configuration from coldtons.toml.
    /// Checks COLDTONS_CONFIG env var first, then current directory.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var("COLDTONS_CONFIG")
            .unwrap_or_else(|_| "coldtons.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            tracing::warn!("Config file not found: {}, using defaults", path);
            Self::default()
        };

        if let Ok(bind) = std::env::var("COLDTONS_BIND") {
            config.server.bind = bind;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ColdtonsError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.heasarc.spatial != "all-sky" {
            return Err(ColdtonsError::Config(format!(
                "unsupported heasarc.spatial mode '{}' (only 'all-sky' is supported)",
                self.heasarc.spatial
            )));
        }
        if self.heasarc.catalog.trim().is_empty() {
            return Err(ColdtonsError::Config("heasarc.catalog must not be empty".to_string()));
        }
        if self.heasarc.retries > MAX_RETRIES {
            return Err(ColdtonsError::Config(format!(
                "heasarc.retries must be at most {}",
                MAX_RETRIES
            )));
        }
        if self.heasarc.identifier_columns.is_empty() {
            return Err(ColdtonsError::Config(
                "heasarc.identifier_columns needs at least one candidate".to_string(),
            ));
        }
        Ok(())
    }
}
