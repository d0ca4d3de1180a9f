use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::SecondsFormat;
use hotjar_common::time::{Clock, SystemClock};
use hotjar_domain::{WebhookDelivery, WebhookEvent};
use serde_json::Value;
use tracing::debug;

/// Accepts webhook calls for one expected event.
///
/// Calls whose body names a different event are dropped; calls that name no
/// event are attributed to the expected one. Nothing is verified about the
/// sender.
#[derive(Clone)]
pub struct WebhookFilter {
    expected: WebhookEvent,
    clock: Arc<dyn Clock>,
}

impl WebhookFilter {
    pub fn new(expected: WebhookEvent) -> Self {
        Self { expected, clock: Arc::new(SystemClock) }
    }

    /// Source of delivery timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn expected(&self) -> WebhookEvent {
        self.expected
    }

    /// Turn an incoming call into a delivery, or `None` if it is for another event.
    pub fn accept(&self, headers: BTreeMap<String, String>, body: Value) -> Option<WebhookDelivery> {
        let event = match body.get("event") {
            None | Some(Value::Null) => self.expected.as_str().to_string(),
            Some(Value::String(received)) if received.is_empty() => {
                self.expected.as_str().to_string()
            }
            Some(Value::String(received)) if received == self.expected.as_str() => {
                received.clone()
            }
            Some(other) => {
                debug!(expected = %self.expected, received = %other, "ignoring webhook for another event");
                return None;
            }
        };

        Some(WebhookDelivery {
            event,
            timestamp: self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
            headers,
            body,
        })
    }
}

impl fmt::Debug for WebhookFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookFilter").field("expected", &self.expected).finish_non_exhaustive()
    }
}

impl Default for WebhookFilter {
    fn default() -> Self {
        Self::new(WebhookEvent::default())
    }
}
