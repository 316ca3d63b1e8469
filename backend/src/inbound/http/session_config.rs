//! Session cookie configuration and validation.
//!
//! Toggles arrive already loaded (see `server::settings::AppSettings`), so this
//! module only decides what they mean for the current build. Debug builds
//! warn and fall back to defaults; release builds refuse anything missing,
//! malformed or insecure.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_SETTING: &str = "session_cookie_secure";
const SAME_SITE_SETTING: &str = "session_same_site";
const ALLOW_EPHEMERAL_SETTING: &str = "session_allow_ephemeral";
const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use commons::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Whether defaults may stand in for missing settings.
    #[must_use]
    pub fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session toggles as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToggles {
    /// Path of the signing key; defaults to `/var/run/secrets/session_key`.
    pub key_file: Option<PathBuf>,
    pub cookie_secure: Option<bool>,
    /// `Strict`, `Lax` or `None`, case-insensitive.
    pub same_site: Option<String>,
    pub allow_ephemeral: Option<bool>,
}

/// Session settings derived from configuration toggles.
pub struct SessionSettings {
    /// Signing key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required setting is missing.
    #[error("missing required setting: {name}")]
    MissingSetting { name: &'static str },
    /// A setting is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("session_same_site=None requires session_cookie_secure=true")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("session_allow_ephemeral must be false in release builds")]
    EphemeralNotAllowed,
}

/// Resolve session settings from loaded toggles and the build mode.
///
/// # Examples
///
/// ```rust
/// use commons::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("commons_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let toggles = SessionToggles {
///     key_file: Some(key_path.clone()),
///     cookie_secure: Some(true),
///     same_site: Some("Strict".to_owned()),
///     allow_ephemeral: Some(false),
/// };
/// let settings = session_settings(&toggles, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure(toggles.cookie_secure, mode)?;
    let same_site = same_site(toggles.same_site.as_deref(), mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral(toggles.allow_ephemeral, mode)?;
    let key_path = toggles
        .key_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH));
    let key = session_key(&key_path, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn debug_or_error<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn cookie_secure(value: Option<bool>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match value {
        Some(flag) => Ok(flag),
        None => debug_or_error(
            mode,
            true,
            SessionConfigError::MissingSetting {
                name: COOKIE_SECURE_SETTING,
            },
            || warn!("session_cookie_secure not set; defaulting to secure"),
        ),
    }
}

fn same_site(
    value: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    let Some(value) = value else {
        return debug_or_error(
            mode,
            default_same_site,
            SessionConfigError::MissingSetting {
                name: SAME_SITE_SETTING,
            },
            || warn!("session_same_site not set; using default"),
        );
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || {
                warn!(
                    "session_same_site=None without a secure cookie; browsers may reject it"
                );
            },
        ),
        _ => debug_or_error(
            mode,
            default_same_site,
            SessionConfigError::InvalidSetting {
                name: SAME_SITE_SETTING,
                value: value.to_owned(),
                expected: SAME_SITE_EXPECTED,
            },
            || warn!(value = %value, "invalid session_same_site; using default"),
        ),
    }
}

fn allow_ephemeral(value: Option<bool>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match value {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(SessionConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None => debug_or_error(
            mode,
            false,
            SessionConfigError::MissingSetting {
                name: ALLOW_EPHEMERAL_SETTING,
            },
            || warn!("session_allow_ephemeral not set; defaulting to disabled"),
        ),
    }
}

fn session_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return debug_or_error(
                    mode,
                    Key::generate(),
                    SessionConfigError::KeyTooShort {
                        path: path.to_path_buf(),
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    },
                    || warn!(length, "session key too short; using temporary key (dev only)"),
                );
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp key file");
        file.write_all(&vec![b'a'; len]).expect("write key");
        file
    }

    fn release_toggles(key: &NamedTempFile) -> SessionToggles {
        SessionToggles {
            key_file: Some(key.path().to_path_buf()),
            cookie_secure: Some(true),
            same_site: Some("Strict".to_owned()),
            allow_ephemeral: Some(false),
        }
    }

    fn missing_key_path() -> PathBuf {
        std::env::temp_dir().join(format!("commons-missing-key-{}", uuid::Uuid::new_v4()))
    }

    #[rstest]
    fn release_accepts_complete_toggles() {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let settings =
            session_settings(&release_toggles(&key), BuildMode::Release).expect("valid settings");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    fn release_rejects_missing_cookie_secure() {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let toggles = SessionToggles {
            cookie_secure: None,
            ..release_toggles(&key)
        };
        let Err(error) = session_settings(&toggles, BuildMode::Release) else {
            panic!("missing cookie_secure should fail");
        };
        assert!(matches!(
            error,
            SessionConfigError::MissingSetting {
                name: COOKIE_SECURE_SETTING
            }
        ));
    }

    #[rstest]
    #[case("sometimes")]
    #[case("")]
    fn release_rejects_unknown_same_site(#[case] value: &str) {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let toggles = SessionToggles {
            same_site: Some(value.to_owned()),
            ..release_toggles(&key)
        };
        let Err(error) = session_settings(&toggles, BuildMode::Release) else {
            panic!("unknown SameSite should fail");
        };
        assert!(matches!(error, SessionConfigError::InvalidSetting { .. }));
    }

    #[rstest]
    fn release_rejects_same_site_none_without_secure() {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let toggles = SessionToggles {
            cookie_secure: Some(false),
            same_site: Some("none".to_owned()),
            ..release_toggles(&key)
        };
        let Err(error) = session_settings(&toggles, BuildMode::Release) else {
            panic!("insecure SameSite=None should fail");
        };
        assert!(matches!(error, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys() {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let toggles = SessionToggles {
            allow_ephemeral: Some(true),
            ..release_toggles(&key)
        };
        let Err(error) = session_settings(&toggles, BuildMode::Release) else {
            panic!("ephemeral keys should fail in release");
        };
        assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_rejects_short_keys() {
        let key = key_file(SESSION_KEY_MIN_LEN - 1);
        let Err(error) = session_settings(&release_toggles(&key), BuildMode::Release) else {
            panic!("short key should fail");
        };
        assert!(matches!(
            error,
            SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
        ));
    }

    #[rstest]
    fn release_rejects_unreadable_key() {
        let toggles = SessionToggles {
            key_file: Some(missing_key_path()),
            cookie_secure: Some(true),
            same_site: Some("Lax".to_owned()),
            allow_ephemeral: Some(false),
        };
        let Err(error) = session_settings(&toggles, BuildMode::Release) else {
            panic!("missing key should fail");
        };
        assert!(matches!(error, SessionConfigError::KeyRead { .. }));
    }

    #[rstest]
    fn debug_falls_back_to_defaults() {
        let toggles = SessionToggles {
            key_file: Some(missing_key_path()),
            ..SessionToggles::default()
        };
        let settings = session_settings(&toggles, BuildMode::Debug).expect("debug defaults");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    #[case("LAX", SameSite::Lax)]
    #[case("strict", SameSite::Strict)]
    #[case("bogus", SameSite::Lax)]
    fn debug_same_site_parsing(#[case] value: &str, #[case] expected: SameSite) {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let toggles = SessionToggles {
            key_file: Some(key.path().to_path_buf()),
            same_site: Some(value.to_owned()),
            ..SessionToggles::default()
        };
        let settings = session_settings(&toggles, BuildMode::Debug).expect("debug settings");
        assert_eq!(settings.same_site, expected);
    }
}
