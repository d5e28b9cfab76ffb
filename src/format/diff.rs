use std::collections::BTreeSet;

use crate::alert::{AlertGroup, LabelSet};

/// Label and annotation keys that are not part of a group's common sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffKeySet {
    pub label_keys: BTreeSet<String>,
    pub annotation_keys: BTreeSet<String>,
}

impl DiffKeySet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label_keys.is_empty() && self.annotation_keys.is_empty()
    }
}

/// Collect the keys that vary between the alerts of `group`.
///
/// Keys are compared by presence only: a key listed in the common set is
/// never reported, whatever value an alert carries for it. A group with a
/// single alert has nothing to compare against and yields an empty set.
#[must_use]
pub fn diff(group: &AlertGroup) -> DiffKeySet {
    if group.alerts.len() <= 1 {
        return DiffKeySet::default();
    }

    let mut keys = DiffKeySet::default();
    for alert in &group.alerts {
        keys.label_keys
            .extend(uncommon_keys(&alert.labels, &group.common_labels));
        keys.annotation_keys
            .extend(uncommon_keys(&alert.annotations, &group.common_annotations));
    }
    keys
}

fn uncommon_keys<'a>(
    own: &'a LabelSet,
    common: &'a LabelSet,
) -> impl Iterator<Item = String> + 'a {
    own.keys()
        .filter(|key| !common.contains_key(key.as_str()))
        .cloned()
}
