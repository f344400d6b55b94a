//! Conversion of alert results into display nodes
//!
//! These functions are pure: they build the complete content of the display
//! region for one outcome, and the handler writes it in a single replace.

use crate::alerts::{AlertFeature, AlertFeatureCollection};
use crate::display::Node;
use crate::error::FetchError;
use crate::query::VALIDATION_MESSAGE;

/// Text shown when a state has no active alerts
pub fn no_alerts_message(state_code: &str) -> String {
    format!("✅ No active weather alerts for {}.", state_code)
}

/// Heading placed above the alert list
pub fn summary_heading(state_code: &str, count: usize) -> String {
    format!(
        "Current watches, warnings, and advisories for {}: {} active alert(s)",
        state_code, count
    )
}

/// Build region content for a decoded collection
///
/// An empty collection yields the single "no alerts" text node. Otherwise
/// the result is a heading followed by one list whose entries keep the API
/// order.
pub fn render_alerts(collection: &AlertFeatureCollection, state_code: &str) -> Vec<Node> {
    let features = collection.features();
    if features.is_empty() {
        return vec![Node::Text(no_alerts_message(state_code))];
    }

    let items = features.iter().map(render_feature).collect();

    vec![
        Node::Heading(summary_heading(state_code, features.len())),
        Node::List(items),
    ]
}

fn render_feature(feature: &AlertFeature) -> Node {
    Node::ListItem(vec![
        Node::Strong(feature.headline().to_string()),
        Node::Paragraph(feature.description().to_string()),
    ])
}

/// Build region content for a failed fetch
pub fn render_error(error: &FetchError, state_code: &str) -> Vec<Node> {
    vec![Node::Text(error.user_message(state_code))]
}

/// Build region content for rejected input
pub fn render_validation_error() -> Vec<Node> {
    vec![Node::text(VALIDATION_MESSAGE)]
}
