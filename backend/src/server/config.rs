//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use fieldtrack::domain::DEFAULT_IMPORT_BATCH_SIZE;
use fieldtrack::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;
use fieldtrack::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) import_batch_size: usize,
    pub(crate) max_upload_bytes: usize,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and the
    /// listen address.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            import_batch_size: DEFAULT_IMPORT_BATCH_SIZE,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one every port falls back to its fixture implementation.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Set the rows written per insert and the upload size limit.
    #[must_use]
    pub fn with_import_settings(mut self, batch_size: usize, max_upload_bytes: usize) -> Self {
        self.import_batch_size = batch_size;
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
