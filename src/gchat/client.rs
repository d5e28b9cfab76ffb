use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::alert::AlertGroup;
use crate::error::{ConfigError, DeliveryError};
use crate::format::{FormattedMessage, compose};

use super::params::QueryParameters;

pub const DEFAULT_BASE_URL: &str = "https://chat.googleapis.com";
const JSON_UTF8: &str = "application/json; charset=UTF-8";

#[derive(Serialize)]
struct ChatMessage<'a> {
    text: &'a str,
}

/// Google Chat webhook client. Cheap to clone; clones share one connection
/// pool.
#[derive(Clone, Debug)]
pub struct GChatClient {
    http: reqwest::Client,
    base: Url,
}

impl GChatClient {
    /// Build a client posting under `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is plain HTTP while `insecure_http` is not
    /// set, or if the underlying HTTP client fails to build.
    pub fn new(
        base: Url,
        timeout: Duration,
        connect_timeout: Duration,
        insecure_http: bool,
    ) -> crate::Result<Self> {
        if base.scheme() != "https" && !insecure_http {
            return Err(ConfigError::InvalidField {
                field: "googlechat.base_url",
                message: "only https URLs are accepted without --insecure".to_string(),
            }
            .into());
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("alert-translator/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90));

        if !insecure_http {
            builder = builder.https_only(true);
        }

        let http = builder
            .build()
            .map_err(|source| DeliveryError::Client { source })?;

        Ok(Self { http, base })
    }

    /// `<base>/v1/spaces/<space>/messages?key=<key>&token=<token>`
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Endpoint`] when the base URL cannot carry a
    /// path.
    pub fn endpoint(&self, params: &QueryParameters) -> Result<Url, DeliveryError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| DeliveryError::Endpoint {
                message: format!("{} cannot be used as a base URL", self.base),
            })?
            .pop_if_empty()
            .extend(["v1", "spaces", params.space.as_str(), "messages"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("key", params.key.expose_secret())
            .append_pair("token", params.token.expose_secret());
        Ok(url)
    }

    /// Post `message` to `endpoint` once.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Network`] when the request cannot complete
    /// and [`DeliveryError::Remote`] when the webhook answers with a
    /// non-success status.
    pub async fn deliver(
        &self,
        endpoint: &Url,
        message: &FormattedMessage,
    ) -> Result<(), DeliveryError> {
        let started = Instant::now();
        let response = self
            .http
            .post(endpoint.clone())
            // Set before `json()`, which only fills in a missing content type.
            .header(CONTENT_TYPE, JSON_UTF8)
            .json(&ChatMessage {
                text: message.text(),
            })
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();

        debug!(
            status = status.as_u16(),
            latency_ms = started.elapsed().as_millis(),
            "webhook accepted message"
        );
        Ok(())
    }

    /// Translate `group` and forward it to the space named in `params`.
    ///
    /// # Errors
    ///
    /// Propagates endpoint construction and delivery errors.
    pub async fn send_alert(
        &self,
        params: &QueryParameters,
        group: &AlertGroup,
    ) -> Result<(), DeliveryError> {
        let message = compose(group);
        let endpoint = self.endpoint(params)?;
        self.deliver(&endpoint, &message).await?;
        info!("Alert `{}` successfully forwarded", group.alertname());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GChatClient;
    use crate::gchat::QueryParameters;
    use std::time::Duration;
    use url::Url;

    fn client(base: &str, insecure: bool) -> crate::Result<GChatClient> {
        let base = match Url::parse(base) {
            Ok(url) => url,
            Err(err) => panic!("test url should parse: {err}"),
        };
        GChatClient::new(base, Duration::from_secs(5), Duration::from_secs(1), insecure)
    }

    fn params(space: &str) -> QueryParameters {
        QueryParameters {
            space: space.to_string(),
            key: "a key".into(),
            token: "t&k".into(),
        }
    }

    #[test]
    fn builds_messages_endpoint() {
        let client = match client("https://chat.googleapis.com", false) {
            Ok(client) => client,
            Err(err) => panic!("client should build: {err}"),
        };
        let url = match client.endpoint(&params("AAAA")) {
            Ok(url) => url,
            Err(err) => panic!("endpoint should build: {err}"),
        };
        assert_eq!(
            url.as_str(),
            "https://chat.googleapis.com/v1/spaces/AAAA/messages?key=a+key&token=t%26k"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let client = match client("http://127.0.0.1:9000/proxy/", true) {
            Ok(client) => client,
            Err(err) => panic!("client should build: {err}"),
        };
        let url = match client.endpoint(&params("space/x")) {
            Ok(url) => url,
            Err(err) => panic!("endpoint should build: {err}"),
        };
        assert_eq!(url.path(), "/proxy/v1/spaces/space%2Fx/messages");
    }

    #[test]
    fn rejects_plain_http_without_insecure() {
        assert!(client("http://chat.example", false).is_err());
    }
}
