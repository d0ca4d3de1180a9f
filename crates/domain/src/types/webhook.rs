//! Webhook event types
//!
//! Hotjar webhooks are registered manually in the Hotjar dashboard and post a
//! JSON body of the form `{ "event": "...", ...payload }`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_wire_name_conversions;

/// Events Hotjar can deliver to a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WebhookEvent {
    SurveyResponseCreated,
    FeedbackReceived,
    RecordingCompleted,
    UserDeletionCompleted,
    HeatmapDataReady,
}

impl_wire_name_conversions!(WebhookEvent {
    SurveyResponseCreated => "survey.response.created",
    FeedbackReceived => "feedback.received",
    RecordingCompleted => "recording.completed",
    UserDeletionCompleted => "user.deletion.completed",
    HeatmapDataReady => "heatmap.data.ready",
});

impl WebhookEvent {
    pub const ALL: [Self; 5] = [
        Self::SurveyResponseCreated,
        Self::FeedbackReceived,
        Self::RecordingCompleted,
        Self::UserDeletionCompleted,
        Self::HeatmapDataReady,
    ];
}

impl Default for WebhookEvent {
    fn default() -> Self {
        Self::SurveyResponseCreated
    }
}

impl TryFrom<String> for WebhookEvent {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WebhookEvent> for String {
    fn from(event: WebhookEvent) -> Self {
        event.as_str().to_string()
    }
}

/// Record forwarded downstream for every accepted webhook call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookDelivery {
    /// Event name as received, or the expected event when the body had none.
    pub event: String,
    /// Receive time, ISO-8601 UTC with millisecond precision.
    pub timestamp: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}
