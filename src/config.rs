use std::time::Duration;

use dotenvy::dotenv;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{error::RelayError, models::retry::RetryConfig};

#[derive(Clone, Deserialize, Debug)]
pub struct FailureRelayConfig {
    pub failure_sns_topic_arn: String,

    #[serde(default = "default_publish_max_retries")]
    pub publish_max_retries: u32,
    #[serde(default = "default_publish_retry_delay_seconds")]
    pub publish_retry_delay_seconds: u64,
}

#[derive(Clone, Deserialize, Debug)]
pub struct AlertRelayConfig {
    pub slack_webhook_url_aws_ssm_parameter_name: String,

    #[serde(default = "default_webhook_timeout_seconds")]
    pub webhook_timeout_seconds: u64,

    #[serde(default = "default_ssm_connect_timeout_seconds")]
    pub ssm_connect_timeout_seconds: u64,
    #[serde(default = "default_ssm_read_timeout_seconds")]
    pub ssm_read_timeout_seconds: u64,
    #[serde(default = "default_ssm_max_attempts")]
    pub ssm_max_attempts: u32,
}

fn default_publish_max_retries() -> u32 {
    RetryConfig::DEFAULT_MAX_RETRIES
}

fn default_publish_retry_delay_seconds() -> u64 {
    RetryConfig::DEFAULT_DELAY_SECONDS
}

fn default_webhook_timeout_seconds() -> u64 {
    10
}

fn default_ssm_connect_timeout_seconds() -> u64 {
    5
}

fn default_ssm_read_timeout_seconds() -> u64 {
    60
}

fn default_ssm_max_attempts() -> u32 {
    5
}

fn load_from_env<T: DeserializeOwned>() -> Result<T, RelayError> {
    dotenv().ok();

    Ok(envy::from_env::<T>()?)
}

fn load_from_vars<T, I>(vars: I) -> Result<T, RelayError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (String, String)>,
{
    Ok(envy::from_iter::<_, T>(vars)?)
}

impl FailureRelayConfig {
    pub fn load() -> Result<Self, RelayError> {
        load_from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, RelayError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        load_from_vars(vars)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.publish_max_retries,
            delay_seconds: self.publish_retry_delay_seconds,
        }
    }
}

impl AlertRelayConfig {
    pub fn load() -> Result<Self, RelayError> {
        load_from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, RelayError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        load_from_vars(vars)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_seconds)
    }
}
