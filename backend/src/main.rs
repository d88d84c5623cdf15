//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fieldtrack::AppSettings;
use fieldtrack::inbound::http::health::HealthState;
use fieldtrack::inbound::http::session_config::{BuildMode, session_settings_from_env};
use fieldtrack::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations_blocking};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    settings
        .validate()
        .map_err(|error| io::Error::other(format!("invalid settings: {error}")))?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|error| io::Error::other(format!("session configuration: {error}")))?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    )
    .with_import_settings(settings.import_batch_size(), settings.max_upload_bytes());

    match settings.database_url() {
        Some(url) => {
            let applied = run_pending_migrations_blocking(url.to_owned())
                .await
                .map_err(|error| io::Error::other(format!("run migrations: {error}")))?;
            info!(applied, "database migrations up to date");
            let max_size = settings.db_max_connections();
            let pool_config = PoolConfig::new(url)
                .with_max_size(max_size)
                .with_min_idle(Some(max_size.min(2)));
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; serving fixture data"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
