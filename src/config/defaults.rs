use std::time::Duration;

pub(super) fn default_bind() -> String {
    "0.0.0.0".to_string()
}

pub(super) const fn default_port() -> u16 {
    8080
}

pub(super) fn default_provider() -> String {
    "googlechat".to_string()
}

pub(super) fn default_base_url() -> String {
    crate::gchat::DEFAULT_BASE_URL.to_string()
}

pub(super) const fn default_request_timeout() -> Duration {
    Duration::from_secs(5)
}

pub(super) const fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}
