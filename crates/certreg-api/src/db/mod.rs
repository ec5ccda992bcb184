//! # Database Persistence Layer
//!
//! SQLite persistence for certificates via SQLx.
//!
//! The database is a single local file (default `certificates.sqlite`),
//! created on first start together with the `certificate` table. There is
//! no migration system: the schema is created once if missing and never
//! altered.

pub mod certificates;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use certificates::CertificateStore;

/// Open the connection pool, creating the database file if it is missing.
pub async fn init_pool(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::info!(url, "Connected to SQLite");
    Ok(pool)
}
