use async_trait::async_trait;
use tracing::{debug, info};

use crate::{error::RelayError, models::retry::RetryConfig, utils::retry_on_rate_limit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub message_id: Option<String>,
}

/// A pub/sub client able to publish a single message to a topic.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(
        &self,
        subject: &str,
        message: &str,
        topic_arn: &str,
    ) -> Result<PublishReceipt, RelayError>;
}

/// Wraps a publisher so that both client creation and publishing tolerate
/// rate limiting under the same fixed-delay policy.
pub struct RetryingPublisher<P> {
    client: P,
    retry_config: RetryConfig,
}

impl<P: TopicPublisher> RetryingPublisher<P> {
    pub async fn create<F, Fut>(retry_config: RetryConfig, factory: F) -> Result<Self, RelayError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<P, RelayError>>,
    {
        info!("Creating publish client");
        let client = retry_on_rate_limit(&retry_config, "create_client", factory).await?;

        Ok(Self {
            client,
            retry_config,
        })
    }

    pub async fn publish(
        &self,
        subject: &str,
        message: &str,
        topic_arn: &str,
    ) -> Result<PublishReceipt, RelayError> {
        debug!(subject, topic_arn, "Publishing message");

        retry_on_rate_limit(&self.retry_config, "publish", || {
            self.client.publish(subject, message, topic_arn)
        })
        .await
    }
}
