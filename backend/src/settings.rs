//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `FIELDTRACK_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::MAX_IMPORT_BATCH_SIZE;
use crate::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Failures validating loaded settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("import batch size must be between 1 and {MAX_IMPORT_BATCH_SIZE}, got {0}")]
    BatchSize(usize),
    #[error("max upload bytes must be positive")]
    UploadLimit,
    #[error("database max connections must be positive")]
    MaxConnections,
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FIELDTRACK")]
pub struct AppSettings {
    /// PostgreSQL URL. Without it the server runs on fixture ports.
    pub database_url: Option<String>,
    /// Listen address.
    pub bind_addr: Option<SocketAddr>,
    /// Track points written per insert statement.
    #[ortho_config(default = 100)]
    pub import_batch_size: usize,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: Option<usize>,
    /// Connection pool size.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn import_batch_size(&self) -> usize {
        self.import_batch_size
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let batch = self.import_batch_size();
        if !(1..=MAX_IMPORT_BATCH_SIZE).contains(&batch) {
            return Err(SettingsError::BatchSize(batch));
        }
        if self.max_upload_bytes() == 0 {
            return Err(SettingsError::UploadLimit);
        }
        if self.db_max_connections() == 0 {
            return Err(SettingsError::MaxConnections);
        }
        Ok(())
    }
}
