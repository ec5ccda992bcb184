//! # certreg-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the certificate registry.
//! Binds to a configurable port (default 8080).

use std::fs::OpenOptions;
use std::sync::Mutex;

use certreg_api::state::{AppConfig, AppState, LogConfig, LogFormat};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build configuration from environment.
    let config = AppConfig::from_env();

    init_tracing(&config.log)?;

    // Open the database and create the certificate table if missing.
    let state = AppState::connect(config).await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let port = state.config.port;
    tracing::info!(
        port,
        database_url = %state.config.database_url,
        max_connections = state.config.max_connections,
        "Database ready"
    );

    let app = certreg_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Certificate registry listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize structured tracing: `RUST_LOG` filter (default `info`),
/// text or JSON lines, stdout or an append-only file.
fn init_tracing(log: &LogConfig) -> std::io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match &log.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.with_ansi(log.file.is_none()).init(),
    }
    Ok(())
}
