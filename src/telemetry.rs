use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;
use crate::types::LogFormat;

const DEFAULT_FILTER: &str = "info,tower_http=warn";

/// Pick the first usable filter among the explicit one, `RUST_LOG`, and the
/// built-in default.
fn resolve_filter(explicit_filter: Option<&str>) -> Result<EnvFilter> {
    explicit_filter
        .map(str::to_string)
        .into_iter()
        .chain(std::env::var("RUST_LOG").ok())
        .chain(std::iter::once(DEFAULT_FILTER.to_string()))
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if no usable filter can be built, if JSON output is
/// requested from a binary built without the `json-logs` feature, or if a
/// global subscriber is already installed.
pub fn init_tracing(explicit_filter: Option<&str>, format: LogFormat) -> Result<()> {
    let filter = resolve_filter(explicit_filter)?;

    match format {
        #[cfg(feature = "json-logs")]
        LogFormat::Json => {
            let subscriber = Registry::default().with(filter).with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json()
                    .with_current_span(true)
                    .flatten_event(true),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|err| Error::Telemetry(err.to_string()))
        }
        #[cfg(not(feature = "json-logs"))]
        LogFormat::Json => Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        )),
        LogFormat::Text => {
            let subscriber = Registry::default()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true));
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|err| Error::Telemetry(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_filter;

    #[test]
    fn explicit_filter_wins_when_valid() {
        let filter = match resolve_filter(Some("alert_translator=debug")) {
            Ok(filter) => filter,
            Err(err) => panic!("filter should parse: {err}"),
        };
        assert!(filter.to_string().contains("alert_translator=debug"));
    }
}
