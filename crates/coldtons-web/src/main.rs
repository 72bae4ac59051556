//! ColDToNs API server
//!
//! Run with: cargo run -p coldtons-web

use coldtons_common::Config;
use coldtons_web::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coldtons=debug,info")),
        )
        .init();

    info!("Starting ColDToNs API...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!(
        "Configuration loaded. HEASARC catalog: {}, ATNF db: {}",
        config.heasarc.catalog, config.atnf.db_path
    );

    // Catalogues are built before serving; failures leave them empty
    let state = AppState::build(config).await;
    let nicer = state.nicer.status();
    info!(
        available = nicer.available,
        pulsars = nicer.count,
        column = nicer.identifier_column.as_deref().unwrap_or("-"),
        "NICER cache status"
    );
    info!(pulsars = state.atnf.len(), "ATNF catalogue status");

    let bind_addr = state.config.server.bind.clone();
    let router = coldtons_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
