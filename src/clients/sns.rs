use async_trait::async_trait;
use aws_config::{BehaviorVersion, retry::RetryConfig as SdkRetryConfig};
use aws_sdk_sns::Client;
use tracing::info;

use crate::{
    clients::publisher::{PublishReceipt, TopicPublisher},
    error::RelayError,
};

pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    /// Builds a client from the default credential chain. SDK retries are
    /// disabled; `RetryingPublisher` owns the retry policy.
    pub async fn connect() -> Result<Self, RelayError> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(SdkRetryConfig::disabled())
            .load()
            .await;

        info!(region = ?sdk_config.region(), "SNS client initialized");

        Ok(Self {
            client: Client::new(&sdk_config),
        })
    }
}

#[async_trait]
impl TopicPublisher for SnsPublisher {
    async fn publish(
        &self,
        subject: &str,
        message: &str,
        topic_arn: &str,
    ) -> Result<PublishReceipt, RelayError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| RelayError::from_aws("sns", &e))?;

        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }
}
