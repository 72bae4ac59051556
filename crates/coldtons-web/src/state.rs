//! Shared application state for the web server.

use std::sync::Arc;

use coldtons_catalog::{CatalogCache, FetchPolicy, HeasarcClient, PulsarCatalogue};
use coldtons_common::Config;
use tracing::warn;

/// Shared state injected into every Axum handler.
///
/// Both catalogues are built before the server starts and never mutated.
pub struct AppState {
    pub config: Config,
    pub nicer: CatalogCache,
    pub atnf: PulsarCatalogue,
}

impl AppState {
    pub fn new(config: Config, nicer: CatalogCache, atnf: PulsarCatalogue) -> Self {
        Self { config, nicer, atnf }
    }

    /// Fetch and index both catalogues. Upstream failures degrade to empty
    /// catalogues; this never fails.
    pub async fn build(config: Config) -> Self {
        let heasarc = &config.heasarc;
        let policy = FetchPolicy {
            timeout: heasarc.timeout(),
            retries: heasarc.retries,
            backoff: heasarc.backoff(),
        };

        let nicer = match HeasarcClient::new(heasarc) {
            Ok(client) => CatalogCache::build(&client, &heasarc.identifier_columns, &policy).await,
            Err(e) => {
                warn!(error = %e, "Could not create HEASARC client");
                CatalogCache::empty(heasarc.catalog.clone())
            }
        };
        let atnf = PulsarCatalogue::load(&config.atnf).await;

        Self::new(config, nicer, atnf)
    }
}

pub type SharedState = Arc<AppState>;
