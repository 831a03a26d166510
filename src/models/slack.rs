use serde::{Deserialize, Serialize};

const ALERT_PRETEXT: &str = "*AWS Alert*";
const ALERT_COLOR: &str = "#ff0000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackPayload {
    pub attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub pretext: String,
    pub title: String,
    pub text: String,
    pub color: String,
}

impl SlackPayload {
    /// Single red attachment carrying the alert subject and its body in a
    /// code block.
    pub fn alert(title: &str, formatted_body: &str) -> Self {
        Self {
            attachments: vec![SlackAttachment {
                pretext: ALERT_PRETEXT.to_string(),
                title: format!(":warning: Alert: {}", title),
                text: format!(":exclamation: *Description:* ```{}```", formatted_body),
                color: ALERT_COLOR.to_string(),
            }],
        }
    }
}
