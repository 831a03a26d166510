use serde::Deserialize;

use crate::error::RelayError;

/// Subject value SNS reports when a message was published without one.
pub const SUBJECT_SENTINEL: &str = "None";

#[derive(Debug, Clone, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsEventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsEventRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsNotification {
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,

    #[serde(rename = "Message")]
    pub message: String,
}

impl SnsEvent {
    pub fn from_json(payload: &str) -> Result<Self, RelayError> {
        serde_json::from_str(payload).map_err(|e| RelayError::MalformedEvent(e.to_string()))
    }

    /// Only the first record is ever consulted.
    pub fn notification(&self) -> Result<&SnsNotification, RelayError> {
        self.records
            .first()
            .map(|record| &record.sns)
            .ok_or_else(|| RelayError::MalformedEvent("envelope contains no records".to_string()))
    }
}

impl SnsNotification {
    /// The subject as delivered, with a missing or null subject folded into
    /// the `"None"` sentinel.
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(SUBJECT_SENTINEL)
    }
}
