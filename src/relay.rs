//! One translate-and-deliver cycle per inbound webhook call.

use std::collections::HashMap;

use tracing::{Instrument, info_span, warn};
use uuid::Uuid;

use crate::Result;
use crate::alert::AlertGroup;
use crate::gchat::{GChatClient, QueryParameters};
use crate::metrics::{Outcome, OutcomeSink};
use crate::types::Provider;

/// Decode `body`, translate it for `provider` and deliver it.
///
/// Exactly one outcome is written to `outcomes` per call, whether the cycle
/// fails on input, on delivery, or succeeds.
///
/// # Errors
///
/// Returns an input error for an unparseable body or missing query
/// parameters, and a delivery error when the webhook call fails.
pub async fn relay(
    provider: Provider,
    client: &GChatClient,
    query: &HashMap<String, String>,
    body: &[u8],
    outcomes: &dyn OutcomeSink,
) -> Result<()> {
    let correlation_id = Uuid::now_v7();
    let span = info_span!("relay", %correlation_id, %provider);

    let result = run(provider, client, query, body).instrument(span.clone()).await;

    outcomes.record(Outcome::from(&result));
    if let Err(err) = &result {
        let cause = std::error::Error::source(err).map(ToString::to_string);
        span.in_scope(|| warn!(error = %err, cause = cause.as_deref(), "alert not forwarded"));
    }
    result
}

async fn run(
    provider: Provider,
    client: &GChatClient,
    query: &HashMap<String, String>,
    body: &[u8],
) -> Result<()> {
    let group = AlertGroup::from_slice(body)?;

    match provider {
        Provider::GoogleChat => {
            let params = QueryParameters::from_query(query)?;
            client.send_alert(&params, &group).await?;
        }
    }
    Ok(())
}
