use std::fmt::Write as _;

use crate::alert::{ALERTNAME, AlertGroup};

use super::diff::diff;
use super::render::render;

/// A chat message ready to be forwarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedMessage {
    text: String,
}

impl FormattedMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Translate an alert group into a single chat message.
///
/// The message is made of a header with the alert name and firing count,
/// the common labels and annotations, then one section per alert state
/// listing only the attributes that differ between alerts.
#[must_use]
pub fn compose(group: &AlertGroup) -> FormattedMessage {
    let mut text = String::new();

    let firing = group.firing().count();
    let status = if firing == 0 {
        "RESOLVED".to_string()
    } else {
        format!("FIRING:{firing}")
    };
    let _ = writeln!(text, "*ALERT: {} [{status}]*", group.alertname());

    write_common(
        &mut text,
        group.common_labels.iter().filter(|(key, _)| key.as_str() != ALERTNAME),
    );
    write_common(&mut text, group.common_annotations.iter());

    let keys = diff(group);
    let sections = [
        ("Firing", render(group.firing(), &keys.label_keys, &keys.annotation_keys)),
        ("Resolved", render(group.resolved(), &keys.label_keys, &keys.annotation_keys)),
    ];
    for (title, blocks) in sections {
        if blocks.is_empty() {
            continue;
        }
        let _ = writeln!(text, "*{title}*:");
        for block in blocks {
            text.push_str("- ");
            text.push_str(&block);
        }
    }

    FormattedMessage { text }
}

fn write_common<'a>(text: &mut String, pairs: impl Iterator<Item = (&'a String, &'a String)>) {
    for (key, value) in pairs {
        let _ = writeln!(text, "{key}: {value}");
    }
}
