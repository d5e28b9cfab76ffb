use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use url::Url;

use crate::Result;
use crate::error::ConfigError;
use crate::types::Provider;

use super::defaults::{
    default_base_url, default_bind, default_connect_timeout, default_port, default_provider,
    default_request_timeout,
};
use super::env::{PORT, PROVIDER, env_parse, env_string};
use super::{Config, ENV_PREFIX, HumantimeDuration};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let builder = ::config::Config::builder()
        .add_source(::config::File::from(path.as_ref()).required(false))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
    deserialize(builder)
}

fn deserialize(
    builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
) -> std::result::Result<RawConfig, ConfigError> {
    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) server: RawServer,
    #[serde(default)]
    pub(super) provider: RawProvider,
    #[serde(default)]
    pub(super) googlechat: RawGoogleChat,
    #[serde(default)]
    pub(super) http: RawHttp,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub(super) bind: String,
    #[serde(default = "default_port")]
    pub(super) port: u16,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawProvider {
    #[serde(default = "default_provider")]
    pub(super) kind: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawGoogleChat {
    #[serde(default = "default_base_url")]
    pub(super) base_url: String,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawHttp {
    #[serde(default = "default_request_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) request_timeout: Duration,
    #[serde(default = "default_connect_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) connect_timeout: Duration,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(port) = env_parse::<u16>(PORT)? {
            self.server.port = port;
        }
        if let Some(provider) = env_string(PROVIDER)? {
            self.provider.kind = provider;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let bind = IpAddr::from_str(self.server.bind.trim()).map_err(|err| {
            ConfigError::InvalidField {
                field: "server.bind",
                message: err.to_string(),
            }
        })?;
        if self.server.port == 0 {
            return Err(ConfigError::InvalidField {
                field: "server.port",
                message: "port must be greater than zero".to_string(),
            }
            .into());
        }

        let provider = Provider::from_str(&self.provider.kind).map_err(|message| {
            ConfigError::InvalidField {
                field: "provider.kind",
                message,
            }
        })?;

        let base_url_src = self.googlechat.base_url.trim();
        if base_url_src.is_empty() {
            return Err(ConfigError::MissingField {
                field: "googlechat.base_url",
            }
            .into());
        }
        let gchat_base_url =
            Url::parse(base_url_src).map_err(|err| ConfigError::InvalidField {
                field: "googlechat.base_url",
                message: err.to_string(),
            })?;

        for (field, value) in [
            ("http.request_timeout", self.http.request_timeout),
            ("http.connect_timeout", self.http.connect_timeout),
        ] {
            if value.is_zero() {
                return Err(ConfigError::InvalidField {
                    field,
                    message: "timeout must be greater than zero".to_string(),
                }
                .into());
            }
        }

        Ok(Config {
            bind,
            port: self.server.port,
            provider,
            gchat_base_url,
            http_request_timeout: self.http.request_timeout,
            http_connect_timeout: self.http.connect_timeout,
        })
    }
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for RawProvider {
    fn default() -> Self {
        Self {
            kind: default_provider(),
        }
    }
}

impl Default for RawGoogleChat {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for RawHttp {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}
