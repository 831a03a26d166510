use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};

use crate::{error::RelayError, models::slack::SlackPayload};

/// Posts alerts to a chat webhook. One attempt per alert, never retried.
pub struct SlackClient {
    http_client: Client,
}

impl SlackClient {
    pub fn new(timeout: Duration) -> Result<Self, RelayError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self { http_client })
    }

    pub async fn dispatch(
        &self,
        webhook_url: &str,
        title: &str,
        formatted_body: &str,
    ) -> Result<(), RelayError> {
        let payload = SlackPayload::alert(title, formatted_body);

        let response = match self.http_client.post(webhook_url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to send the alert to Slack");
                return Err(RelayError::Webhook(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            info!("The alert is sent to Slack successfully");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Slack rejected the alert");
            Err(RelayError::WebhookStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}
