use crate::alerts::AlertSource;
use crate::display::{InputField, Surface};
use crate::error::ErrorKind;
use crate::query::StateCode;
use crate::render::{render_alerts, render_error, render_validation_error};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Result of one trigger, for callers that want more than the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Input was not a two-letter code; no request was issued
    Rejected,
    /// The state has no active alerts
    NoAlerts,
    /// A list of this many alerts was rendered
    Rendered(usize),
    /// The fetch failed and an error message was rendered
    Failed(ErrorKind),
    /// A newer trigger started while this one was in flight; nothing was rendered
    Superseded,
}

/// Fetch-and-render handler wired to an input field, a display surface and
/// an alert source
///
/// Each call to [`trigger`](Self::trigger) is an independent run of
/// validate, fetch, then render-or-error. Clones share all handles, so
/// overlapping triggers write to the same surface.
///
/// With sequencing enabled (the default), every trigger that passes
/// validation takes a token from a shared counter and a fetch result is only rendered if no newer trigger has
/// started in the meantime. The latest query therefore always owns the
/// display, regardless of the order responses arrive in.
#[derive(Clone)]
pub struct AlertHandler {
    input: InputField,
    display: Arc<dyn Surface>,
    source: Arc<dyn AlertSource>,
    latest_token: Arc<AtomicU64>,
    sequence_responses: bool,
}

impl AlertHandler {
    /// Create a handler with response sequencing enabled
    ///
    /// # Arguments
    ///
    /// * `input` - Field the state code is read from
    /// * `display` - Surface whose content is replaced on every cycle
    /// * `source` - Where alerts are fetched from
    pub fn new(
        input: InputField,
        display: Arc<dyn Surface>,
        source: Arc<dyn AlertSource>,
    ) -> Self {
        Self {
            input,
            display,
            source,
            latest_token: Arc::new(AtomicU64::new(0)),
            sequence_responses: true,
        }
    }

    /// Enable or disable dropping of superseded results
    ///
    /// Disabled, every result is rendered when it arrives and the last one to
    /// arrive stays on screen.
    pub fn with_sequencing(mut self, enabled: bool) -> Self {
        self.sequence_responses = enabled;
        self
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    /// Run one validate, fetch, render cycle for the current input value
    pub async fn trigger(&self) -> TriggerOutcome {
        let state = match StateCode::parse(&self.input.value()) {
            Ok(state) => state,
            Err(e) => {
                warn!("Rejected state code input '{}': {}", e.input, e);
                self.display.replace(render_validation_error());
                return TriggerOutcome::Rejected;
            }
        };

        // Only queries that reach the network take part in sequencing
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;

        // A pending request shows a blank region, never stale results
        self.display.replace(Vec::new());
        info!("Fetching active alerts for {}", state);

        let result = self.source.fetch(&state).await;

        if self.is_superseded(token) {
            debug!(
                "Discarding result for {} (request {}), a newer query is pending",
                state, token
            );
            return TriggerOutcome::Superseded;
        }

        match result {
            Ok(collection) => {
                for feature in collection.features() {
                    debug!(
                        "Alert for {}: {} [{}] {}",
                        state,
                        feature.properties.event.as_deref().unwrap_or("unknown event"),
                        feature.properties.severity.as_deref().unwrap_or("unknown severity"),
                        feature.properties.area_desc.as_deref().unwrap_or("")
                    );
                }

                let count = collection.len();
                self.display.replace(render_alerts(&collection, state.as_str()));
                self.input.clear();

                if count == 0 {
                    info!("No active alerts for {}", state);
                    TriggerOutcome::NoAlerts
                } else {
                    info!("Rendered {} active alert(s) for {}", count, state);
                    TriggerOutcome::Rendered(count)
                }
            }
            Err(e) => {
                error!("Fetch error for {}: {}", state, e);
                self.display.replace(render_error(&e, state.as_str()));
                TriggerOutcome::Failed(e.kind())
            }
        }
    }

    fn is_superseded(&self, token: u64) -> bool {
        self.sequence_responses && self.latest_token.load(Ordering::SeqCst) != token
    }
}
