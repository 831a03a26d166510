use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, retry::RetryConfig as SdkRetryConfig, timeout::TimeoutConfig};
use aws_sdk_ssm::Client;
use tracing::{debug, info};

use crate::{config::AlertRelayConfig, error::RelayError};

/// Source of secret configuration values, looked up by name.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<String, RelayError>;
}

pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub async fn connect(config: &AlertRelayConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .connect_timeout(Duration::from_secs(config.ssm_connect_timeout_seconds))
            .read_timeout(Duration::from_secs(config.ssm_read_timeout_seconds))
            .build();

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(timeouts)
            .retry_config(SdkRetryConfig::standard().with_max_attempts(config.ssm_max_attempts))
            .load()
            .await;

        info!(
            max_attempts = config.ssm_max_attempts,
            "SSM parameter store client initialized"
        );

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretStore for SsmParameterStore {
    async fn get_secret(&self, name: &str) -> Result<String, RelayError> {
        debug!(parameter = name, "Fetching parameter");

        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| RelayError::from_aws("ssm", &e))?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| RelayError::ConfigurationMissing(format!("parameter {name} has no value")))
    }
}
