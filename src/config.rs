//! Server configuration from environment variables.
//!
//! | Variable                    | Default        |
//! |-----------------------------|----------------|
//! | `PORT`                      | `3000`         |
//! | `SITE_DIR`                  | `client/dist`  |
//! | `ASSET_CACHE_MAX_AGE_SECS`  | `31536000`     |
//! | `IMAGE_CACHE_MAX_AGE_SECS`  | `86400`        |

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_DIR: &str = "client/dist";
pub const DEFAULT_ASSET_CACHE_MAX_AGE_SECS: u64 = 31_536_000;
pub const DEFAULT_IMAGE_CACHE_MAX_AGE_SECS: u64 = 86_400;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid { var: &'static str, value: String, expected: &'static str },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Root of the built client (Trunk `dist/`), with `assets/` and `images/` beneath it.
    pub site_dir: PathBuf,
    pub asset_cache_max_age_secs: u64,
    pub image_cache_max_age_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            asset_cache_max_age_secs: DEFAULT_ASSET_CACHE_MAX_AGE_SECS,
            image_cache_max_age_secs: DEFAULT_IMAGE_CACHE_MAX_AGE_SECS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; unset variables use defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = parse_var(&lookup, "PORT", "port number", defaults.port)?;
        let site_dir = match lookup("SITE_DIR") {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::Empty { var: "SITE_DIR" }),
            Some(raw) => PathBuf::from(raw.trim()),
            None => defaults.site_dir,
        };
        let asset_cache_max_age_secs =
            parse_var(&lookup, "ASSET_CACHE_MAX_AGE_SECS", "number of seconds", defaults.asset_cache_max_age_secs)?;
        let image_cache_max_age_secs =
            parse_var(&lookup, "IMAGE_CACHE_MAX_AGE_SECS", "number of seconds", defaults.image_cache_max_age_secs)?;
        Ok(Self { port, site_dir, asset_cache_max_age_secs, image_cache_max_age_secs })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw, expected }),
    }
}
