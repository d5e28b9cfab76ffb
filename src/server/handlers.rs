use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::Error;
use crate::relay::relay;

use super::AppState;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4";

pub(super) async fn alert(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    // A dropped client connection cancels this future, not the spawned cycle,
    // so the outcome is always recorded.
    let cycle = tokio::spawn(async move {
        relay(
            state.provider,
            &state.client,
            &query,
            &body,
            state.metrics.as_ref(),
        )
        .await
    });

    match cycle.await {
        Ok(Ok(())) => StatusCode::OK.into_response(),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            error!(error = %err, "relay task aborted");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(super) async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(text) => ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], text).into_response(),
        Err(err) => error_response(&err),
    }
}

pub(super) async fn health() -> &'static str {
    "ok"
}

fn error_response(err: &Error) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else if err.is_delivery_failure() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, err.to_string()).into_response()
}
