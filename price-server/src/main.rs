use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use price_core::PricingTables;
use price_core::db::{DbConfig, MemoryStoreFactory, StoreRegistry};
use price_db_sqlite::SqliteStoreFactory;
use price_server::{AppState, router};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Vehicle marketplace API server.
///
/// Serves the vehicle catalog, heuristic price estimates, mock
/// authentication and the discussion forum over HTTP.
#[derive(Debug, Parser)]
struct Cli {
    /// Database backend to use.
    #[arg(long, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `market.db`) or `:memory:`.
    #[arg(long, default_value = "market.db")]
    db: String,

    /// Address and port to listen on.
    #[arg(long, default_value = "127.0.0.1:5000")]
    listen: String,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let db_config = DbConfig {
        backend: cli.backend,
        connection_string: cli.db,
    };

    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));

    debug!("connecting to {} backend", db_config.backend);
    let store = registry.create(&db_config).await?;
    let state = AppState::new(Arc::from(store), PricingTables::default());

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
