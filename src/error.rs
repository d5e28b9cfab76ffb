use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("HTTP listener failed")]
    Server {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

/// Problems with an inbound request, detected before any rendering happens.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed alert group: {message}")]
    Malformed { message: String },
    #[error("required query parameter missing: {name}")]
    MissingParameter { name: &'static str },
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid webhook endpoint: {message}")]
    Endpoint { message: String },
    #[error("webhook request failed")]
    Network {
        #[source]
        source: reqwest::Error,
    },
    #[error("webhook rejected message with HTTP status {status}")]
    Remote { status: reqwest::StatusCode },
}

/// The request URL carries the webhook credentials, so it is stripped before
/// the error is kept.
impl From<reqwest::Error> for DeliveryError {
    fn from(source: reqwest::Error) -> Self {
        if let Some(status) = source.status() {
            return Self::Remote { status };
        }
        Self::Network {
            source: source.without_url(),
        }
    }
}

impl Error {
    /// True when the failure was caused by the caller's request rather than
    /// by this service or the webhook.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    #[must_use]
    pub const fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            Self::Delivery(DeliveryError::Network { .. } | DeliveryError::Remote { .. })
        )
    }
}
