//! Alertmanager webhook payload.
//!
//! Label and annotation maps are `BTreeMap`s so that every iteration over
//! them happens in sorted key order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::InputError;
use crate::types::AlertStatus;

pub type LabelSet = BTreeMap<String, String>;

pub(crate) const ALERTNAME: &str = "alertname";

/// One alert of a group, with its own labels and annotations.
///
/// Only `status`, `labels` and `annotations` take part in translation; the
/// remaining Alertmanager fields are kept for logging and future use.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub status: AlertStatus,
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default)]
    pub annotations: LabelSet,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "generatorURL")]
    pub generator_url: Option<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

/// A batch of alerts grouped upstream, sharing `common_labels` and
/// `common_annotations`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertGroup {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub group_key: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub status: Option<AlertStatus>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub group_labels: LabelSet,
    #[serde(default)]
    pub common_labels: LabelSet,
    #[serde(default)]
    pub common_annotations: LabelSet,
    #[serde(default, rename = "externalURL")]
    pub external_url: Option<String>,
}

impl Alert {
    #[must_use]
    pub fn new(status: AlertStatus, labels: LabelSet, annotations: LabelSet) -> Self {
        Self {
            status,
            labels,
            annotations,
            starts_at: None,
            ends_at: None,
            generator_url: None,
            fingerprint: None,
        }
    }

    #[must_use]
    pub fn is_firing(&self) -> bool {
        self.status == AlertStatus::Firing
    }
}

impl AlertGroup {
    /// Decode a webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Malformed`] when the body is not a valid
    /// alert group document.
    pub fn from_slice(body: &[u8]) -> Result<Self, InputError> {
        serde_json::from_slice(body).map_err(|err| InputError::Malformed {
            message: err.to_string(),
        })
    }

    /// The group's `alertname` common label, or `""` when absent.
    #[must_use]
    pub fn alertname(&self) -> &str {
        self.common_labels
            .get(ALERTNAME)
            .map_or("", String::as_str)
    }

    pub fn firing(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|alert| alert.is_firing())
    }

    pub fn resolved(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|alert| !alert.is_firing())
    }
}

/// Build a [`LabelSet`] from string pairs.
#[must_use]
pub fn label_set<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> LabelSet {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
