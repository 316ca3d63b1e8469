//! Builders for the HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use crate::domain::ports::RepositorySet;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::in_memory_repositories;
use crate::outbound::persistence::diesel_repositories;
use crate::outbound::security::{Argon2PasswordHasher, HmacWebhookVerifier};

use super::ServerConfig;

/// Diesel repositories when a pool is configured, the in-memory store
/// otherwise.
fn build_repositories(config: &ServerConfig) -> RepositorySet {
    match &config.db_pool {
        Some(pool) => {
            info!("serving repositories from PostgreSQL");
            diesel_repositories(pool.clone())
        }
        None => {
            info!("no database configured; serving repositories from memory");
            in_memory_repositories()
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repositories(
        build_repositories(config),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(HmacWebhookVerifier::new(config.webhook_secret.clone())),
        Arc::new(DefaultClock),
    ))
}
