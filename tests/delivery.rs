#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use alert_translator::alert::{Alert, AlertGroup, label_set};
use alert_translator::error::DeliveryError;
use alert_translator::format::compose;
use alert_translator::gchat::{GChatClient, QueryParameters};
use alert_translator::types::AlertStatus;
use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base: &str, timeout: Duration) -> GChatClient {
    GChatClient::new(
        Url::parse(base).expect("valid mock url"),
        timeout,
        Duration::from_millis(200),
        true,
    )
    .expect("client")
}

fn params() -> QueryParameters {
    QueryParameters {
        space: "AAAA1234".to_string(),
        key: SecretString::from("api-key"),
        token: SecretString::from("api-token"),
    }
}

fn high_cpu() -> AlertGroup {
    let host = |status: AlertStatus, instance: &'static str| {
        Alert::new(
            status,
            label_set([
                ("alertname", "HighCPU"),
                ("severity", "critical"),
                ("instance", instance),
            ]),
            label_set([]),
        )
    };
    AlertGroup {
        common_labels: label_set([("alertname", "HighCPU"), ("severity", "critical")]),
        alerts: vec![
            host(AlertStatus::Firing, "host1"),
            host(AlertStatus::Resolved, "host2"),
        ],
        ..AlertGroup::default()
    }
}

#[tokio::test]
async fn posts_single_text_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/spaces/AAAA1234/messages"))
        .and(query_param("key", "api-key"))
        .and(query_param("token", "api-token"))
        .and(header("content-type", "application/json; charset=UTF-8"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri(), Duration::from_secs(2));
    client
        .send_alert(&params(), &high_cpu())
        .await
        .expect("delivery");

    let requests = server.received_requests().await.expect("requests");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    insta::assert_json_snapshot!(body, @r#"
    {
      "text": "*ALERT: HighCPU [FIRING:1]*\nseverity: critical\n*Firing*:\n- \tinstance: host1\n*Resolved*:\n- \tinstance: host2\n"
    }
    "#);
}

#[tokio::test]
async fn remote_status_is_reported_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri(), Duration::from_secs(2));
    let endpoint = client.endpoint(&params()).expect("endpoint");
    let err = client
        .deliver(&endpoint, &compose(&high_cpu()))
        .await
        .expect_err("should fail");
    match err {
        DeliveryError::Remote { status } => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn client_errors_are_remote_failures_too() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client(&server.uri(), Duration::from_secs(2));
    let err = client
        .send_alert(&params(), &high_cpu())
        .await
        .expect_err("should fail");
    assert!(matches!(err, DeliveryError::Remote { status } if status.as_u16() == 403));
}

#[tokio::test]
async fn timeouts_surface_as_network_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    let client = client(&server.uri(), Duration::from_millis(300));
    let err = client
        .send_alert(&params(), &high_cpu())
        .await
        .expect_err("should time out");
    assert!(matches!(err, DeliveryError::Network { .. }));
    assert_no_credentials(&err);
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let client = client("http://127.0.0.1:9", Duration::from_secs(1));
    let err = client
        .send_alert(&params(), &high_cpu())
        .await
        .expect_err("nothing listens on the discard port");
    assert!(matches!(err, DeliveryError::Network { .. }));
    // The cause is reported once, through `source()`.
    assert_eq!(err.to_string(), "webhook request failed");
    assert!(std::error::Error::source(&err).is_some());
}

fn assert_no_credentials(err: &(dyn std::error::Error + 'static)) {
    let mut current = Some(err);
    while let Some(err) = current {
        for rendered in [err.to_string(), format!("{err:?}")] {
            assert!(!rendered.contains("api-key"), "key leaked: {rendered}");
            assert!(!rendered.contains("api-token"), "token leaked: {rendered}");
        }
        current = err.source();
    }
}

#[tokio::test]
async fn network_errors_do_not_expose_credentials() {
    let client = client("http://127.0.0.1:9", Duration::from_secs(1));
    let err = client
        .send_alert(&params(), &high_cpu())
        .await
        .expect_err("nothing listens on the discard port");
    assert_no_credentials(&err);

    let err = alert_translator::error::Error::from(err);
    assert_no_credentials(&err);
}
