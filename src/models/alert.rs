use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use tracing::debug;

use crate::{error::RelayError, models::event::SUBJECT_SENTINEL};

/// Keys removed from one object nested under `parent`.
#[derive(Debug, Clone, Copy)]
pub struct NestedRedaction {
    pub parent: &'static str,
    pub keys: &'static [&'static str],
}

/// Deny-list of alert fields that only add noise for a human reader.
/// Anything not listed is passed through untouched.
#[derive(Debug, Clone, Copy)]
pub struct RedactionSpec {
    pub top_level: &'static [&'static str],
    pub nested: &'static [NestedRedaction],
}

impl RedactionSpec {
    pub const CLOUDWATCH: RedactionSpec = RedactionSpec {
        top_level: &[
            "AlarmActions",
            "AlarmConfigurationUpdatedTimestamp",
            "InsufficientDataActions",
            "NewStateReason",
            "NewStateValue",
            "OKActions",
            "OldStateValue",
            "StateChangeTime",
            "time",
        ],
        nested: &[
            NestedRedaction {
                parent: "Trigger",
                keys: &[
                    "ComparisonOperator",
                    "EvaluateLowSampleCountPercentile",
                    "EvaluationPeriods",
                    "StatisticType",
                    "Threshold",
                    "TreatMissingData",
                    "Unit",
                ],
            },
            NestedRedaction {
                parent: "details",
                keys: &[
                    "ActivityId",
                    "additional-information",
                    "communicationId",
                    "current-phase-context",
                    "current-phase",
                    "EndTime",
                    "page",
                    "RequestId",
                    "StartTime",
                    "totalPages",
                    "version",
                ],
            },
        ],
    };

    /// Removes every listed key that is present. Nested lists only apply
    /// when the parent value is an object.
    pub fn apply(&self, body: &mut Map<String, Value>) {
        remove_keys(body, self.top_level);

        for nested in self.nested {
            if let Some(Value::Object(child)) = body.get_mut(nested.parent) {
                remove_keys(child, nested.keys);
            }
        }
    }
}

impl Default for RedactionSpec {
    fn default() -> Self {
        Self::CLOUDWATCH
    }
}

fn remove_keys(object: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        if object.shift_remove(*key).is_some() {
            debug!(key, "Redacted alert field");
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformedAlert {
    pub subject: String,
    pub body: Map<String, Value>,
}

impl TransformedAlert {
    /// Renders the body with four-space indentation, keys in received order.
    pub fn formatted_body(&self) -> Result<String, RelayError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.body.serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(|e| RelayError::InvalidAlert(e.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlertTransformer {
    redaction: RedactionSpec,
}

impl AlertTransformer {
    pub fn new(redaction: RedactionSpec) -> Self {
        Self { redaction }
    }

    /// Parses an alert message. Anything other than a JSON object is rejected.
    pub fn parse_body(message: &str) -> Result<Map<String, Value>, RelayError> {
        match serde_json::from_str::<Value>(message)? {
            Value::Object(body) => Ok(body),
            other => Err(RelayError::InvalidAlert(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn transform(&self, subject: &str, mut body: Map<String, Value>) -> TransformedAlert {
        let subject = derive_subject(subject, &body);
        self.redaction.apply(&mut body);

        TransformedAlert { subject, body }
    }
}

/// Builds a readable subject when the notification arrived without one.
pub fn derive_subject(subject: &str, body: &Map<String, Value>) -> String {
    if subject != SUBJECT_SENTINEL {
        return subject.to_string();
    }

    match (body.get("name"), body.get("region")) {
        (Some(name), Some(region)) => {
            format!("EVENT: '{}' in {}", plain_text(name), plain_text(region))
        }
        _ => "EVENT".to_string(),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
