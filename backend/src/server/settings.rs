//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `COMMONS_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::inbound::http::session_config::{BuildMode, SessionToggles};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_WEBHOOK_SECRET: &str = "commons-dev-webhook-secret";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr { value: String },
    #[error("webhook_secret must be set in release builds")]
    MissingWebhookSecret,
}

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMMONS")]
pub struct AppSettings {
    /// Socket address to listen on; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server keeps state in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Shared secret for payment provider webhook signatures.
    pub webhook_secret: Option<String>,
    /// Session signing key file.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`. Environment or file only: a clap
    /// switch cannot tell "unset" from "false".
    #[ortho_config(skip_cli)]
    pub session_cookie_secure: Option<bool>,
    /// `SameSite` policy for session cookies.
    pub session_same_site: Option<String>,
    /// Permit a generated session key when the key file is unreadable.
    #[ortho_config(skip_cli)]
    pub session_allow_ephemeral: Option<bool>,
}

impl AppSettings {
    /// Parse the listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
            })
    }

    /// Pool configuration when a database is configured.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().map(str::trim)?;
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url);
        Some(match self.db_pool_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }

    /// Webhook secret bytes; debug builds fall back to a fixed development
    /// secret.
    pub fn webhook_secret(&self, mode: BuildMode) -> Result<Vec<u8>, SettingsError> {
        match self.webhook_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Ok(secret.as_bytes().to_vec()),
            None if mode.is_debug() => {
                warn!("webhook_secret not set; using development secret");
                Ok(DEV_WEBHOOK_SECRET.as_bytes().to_vec())
            }
            None => Err(SettingsError::MissingWebhookSecret),
        }
    }

    /// Session toggles for [`crate::inbound::http::session_config`].
    #[must_use]
    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self.session_key_file.clone(),
            cookie_secure: self.session_cookie_secure,
            same_site: self.session_same_site.clone(),
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}
