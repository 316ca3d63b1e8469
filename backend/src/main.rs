//! Backend entry-point: loads settings, prepares persistence and serves the
//! REST API.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use commons::inbound::http::health::HealthState;
use commons::inbound::http::session_config::{BuildMode, session_settings};
use commons::outbound::persistence::{DbPool, run_migrations};
use commons::server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings(&settings.session_toggles(), mode)
        .wrap_err("validate session settings")?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_webhook_secret(settings.webhook_secret(mode)?);

    if let Some(pool_config) = settings.pool_config() {
        run_migrations(pool_config.database_url())
            .await
            .wrap_err("apply database migrations")?;
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("create database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("start HTTP server")?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("serve HTTP")
}
