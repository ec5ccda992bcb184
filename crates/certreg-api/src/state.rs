//! # Application State
//!
//! Configuration and the shared state handed to every route handler via
//! the `State` extractor. The certificate service, and through it the
//! store, is constructed once at startup and injected here.

use std::path::PathBuf;

use crate::db::{self, CertificateStore};
use crate::service::CertificateService;

/// Default SQLite location, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://certificates.sqlite";

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Output encoding (`CERTREG_LOG_FORMAT`).
    pub format: LogFormat,
    /// Append to this file instead of stdout (`CERTREG_LOG_FILE`).
    pub file: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// SQLx SQLite connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Logging settings.
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults. Unparseable numbers are logged and
    /// also fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let log = LogConfig {
            format: match lookup("CERTREG_LOG_FORMAT").as_deref() {
                Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            file: lookup("CERTREG_LOG_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        };

        Self {
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database_url),
            max_connections: parse_or(
                "CERTREG_MAX_CONNECTIONS",
                lookup("CERTREG_MAX_CONNECTIONS"),
                defaults.max_connections,
            ),
            log,
        }
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, fallback = %default, "ignoring invalid setting");
            default
        }),
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Certificate lifecycle operations.
    pub certificates: CertificateService,
    /// Configuration the server was started with.
    pub config: AppConfig,
}

impl AppState {
    /// Assemble state from an already-built service.
    pub fn new(config: AppConfig, certificates: CertificateService) -> Self {
        Self {
            certificates,
            config,
        }
    }

    /// Open the database named by `config`, create the table if missing,
    /// and wire up the certificate service.
    pub async fn connect(config: AppConfig) -> Result<Self, sqlx::Error> {
        let pool = db::init_pool(&config.database_url, config.max_connections).await?;
        let store = CertificateStore::open(pool).await?;
        Ok(Self::new(config, CertificateService::new(store)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "sqlite:///var/lib/certreg/db.sqlite"),
            ("CERTREG_MAX_CONNECTIONS", "12"),
            ("CERTREG_LOG_FORMAT", "JSON"),
            ("CERTREG_LOG_FILE", "logs.log"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_url, "sqlite:///var/lib/certreg/db.sqlite");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.file, Some(PathBuf::from("logs.log")));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("CERTREG_MAX_CONNECTIONS", "-1"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 5);
    }

    #[tokio::test]
    async fn connect_creates_database_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fresh.sqlite");
        let config = AppConfig {
            database_url: format!("sqlite://{}", path.display()),
            ..AppConfig::default()
        };

        let state = AppState::connect(config.clone()).await.unwrap();
        assert!(path.exists());
        assert_eq!(state.config, config);
        assert!(state.certificates.get_all().await.unwrap().is_empty());
    }
}
