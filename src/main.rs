//! Fakenodo mock deposition service.
//!
//! A small stand-in for the Zenodo deposit API, used by applications that
//! need a DOI-minting collaborator without talking to the real service.
//!
//! # Architecture Overview
//!
//! ```text
//!  fakenodo-cli probe ──GET /fakenodo/test──▶ ┌──────────────────────────┐
//!                                             │        FAKENODO          │
//!  API clients ──deposit/depositions──▶       │  http ─▶ deposition      │
//!                                             │  server    service       │
//!                                             │              │           │
//!                                             │              ▼           │
//!                                             │        JSON file store   │
//!                                             └──────────────────────────┘
//! ```

use tokio::net::TcpListener;

use fakenodo::config::load_or_default;
use fakenodo::deposition::{DepositionService, DepositionStore};
use fakenodo::http::HttpServer;
use fakenodo::lifecycle::Shutdown;
use fakenodo::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("fakenodo=info,tower_http=info");

    // FAKENODO_CONFIG points at a TOML file; defaults apply otherwise.
    let config = load_or_default(None)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_path = %config.store.path,
        "Configuration loaded"
    );

    let store = DepositionStore::open(&config.store.path);
    let service = DepositionService::new(store);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(&config, service);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
