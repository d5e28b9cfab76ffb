use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::alert::{Alert, LabelSet};

/// Render the differing attributes of each alert as an indented block.
///
/// Blocks keep the order of `alerts`. Alerts that carry none of the keys
/// (or only empty values for them) contribute no block.
pub fn render<'a>(
    alerts: impl IntoIterator<Item = &'a Alert>,
    label_keys: &BTreeSet<String>,
    annotation_keys: &BTreeSet<String>,
) -> Vec<String> {
    alerts
        .into_iter()
        .filter_map(|alert| {
            let mut block = String::new();
            write_pairs(&mut block, &alert.labels, label_keys);
            write_pairs(&mut block, &alert.annotations, annotation_keys);
            (!block.is_empty()).then_some(block)
        })
        .collect()
}

fn write_pairs(block: &mut String, values: &LabelSet, keys: &BTreeSet<String>) {
    for key in keys {
        match values.get(key) {
            Some(value) if !value.is_empty() => {
                let _ = writeln!(block, "\t{key}: {value}");
            }
            _ => {}
        }
    }
}
