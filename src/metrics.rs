use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::Result;

const HANDLED_ALERTS: &str = "alert_translator_handled_alerts";
const HANDLED_ALERTS_HELP: &str =
    "Increment for each alert handled at /alerts. Label for status of success/failure";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl<T, E> From<&std::result::Result<T, E>> for Outcome {
    fn from(result: &std::result::Result<T, E>) -> Self {
        if result.is_ok() {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Receives the outcome of each handled request.
///
/// Implementations are shared between concurrently served requests and must
/// count atomically.
pub trait OutcomeSink: Send + Sync {
    fn record(&self, outcome: Outcome);
}

/// Prometheus-backed outcome counter with its own registry.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    handled: IntCounterVec,
}

impl Metrics {
    /// # Errors
    ///
    /// Returns an error if the counter cannot be registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let handled = IntCounterVec::new(
            Opts::new(HANDLED_ALERTS, HANDLED_ALERTS_HELP),
            &["status"],
        )?;
        registry.register(Box::new(handled.clone()))?;

        // Export both series from the start, even before the first request.
        for outcome in [Outcome::Success, Outcome::Failure] {
            handled.with_label_values(&[outcome.as_str()]);
        }

        Ok(Self { registry, handled })
    }

    #[must_use]
    pub fn handled(&self, outcome: Outcome) -> u64 {
        self.handled.with_label_values(&[outcome.as_str()]).get()
    }

    /// Render the registry in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the gathered families cannot be encoded.
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl OutcomeSink for Metrics {
    fn record(&self, outcome: Outcome) {
        self.handled.with_label_values(&[outcome.as_str()]).inc();
    }
}
