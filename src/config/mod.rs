use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::Result;
use crate::error::Error;
use crate::types::Provider;

mod defaults;
mod env;
mod raw;
mod serde;

use self::serde::HumantimeDuration;

/// Prefix of the layered environment source, e.g.
/// `ALERT_TRANSLATOR__HTTP__REQUEST_TIMEOUT=3s`.
pub const ENV_PREFIX: &str = "ALERT_TRANSLATOR";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
    pub provider: Provider,
    pub gchat_base_url: Url,
    pub http_request_timeout: Duration,
    pub http_connect_timeout: Duration,
}

impl Config {
    /// Load configuration from an optional TOML file, then the
    /// `ALERT_TRANSLATOR__*` variables, then `PORT` and `PROVIDER`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when an environment
    /// override is invalid, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(Error::from)?;
        raw.apply_env_overrides().map_err(Error::from)?;
        raw.validate_and_build()
    }

    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
