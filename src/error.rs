use aws_sdk_sns::error::ProvideErrorMetadata;
use thiserror::Error;

/// Error codes AWS services use to reject a caller that exceeded its quota.
const RATE_LIMIT_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "Throttled",
    "ThrottledException",
];

const PARAMETER_NOT_FOUND_CODE: &str = "ParameterNotFound";

/// Alert relay exit code when the webhook call itself failed.
pub const DISPATCH_FAILURE_EXIT: u8 = 1;
/// Alert relay exit code for every failure before dispatch.
pub const INVOCATION_FAILURE_EXIT: u8 = 2;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{service} rate limit exceeded: {message}")]
    RateLimited { service: String, message: String },

    #[error("{service} request failed ({code}): {message}")]
    Service {
        service: String,
        code: String,
        message: String,
    },

    #[error("Invalid alert payload: {0}")]
    InvalidAlert(String),

    #[error("Malformed notification envelope: {0}")]
    MalformedEvent(String),

    #[error("Webhook request failed: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("Webhook returned status {status}: {body}")]
    WebhookStatus { status: u16, body: String },

    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),
}

impl RelayError {
    /// Maps an AWS SDK failure onto the relay taxonomy using its error code.
    pub fn from_aws<E>(service: &str, err: &E) -> Self
    where
        E: ProvideErrorMetadata + std::fmt::Display,
    {
        let code = err.code().unwrap_or_default();
        let message = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());

        if RATE_LIMIT_CODES.contains(&code) {
            RelayError::RateLimited {
                service: service.to_string(),
                message,
            }
        } else if code == PARAMETER_NOT_FOUND_CODE {
            RelayError::ConfigurationMissing(format!("{service}: {message}"))
        } else {
            RelayError::Service {
                service: service.to_string(),
                code: if code.is_empty() {
                    "unknown".to_string()
                } else {
                    code.to_string()
                },
                message,
            }
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RelayError::RateLimited { .. })
    }

    /// True when the webhook delivery itself failed, as opposed to anything
    /// that went wrong before it was attempted.
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(
            self,
            RelayError::Webhook(_) | RelayError::WebhookStatus { .. }
        )
    }

    /// Process exit code the alert relay reports for this failure.
    pub fn exit_code(&self) -> u8 {
        if self.is_dispatch_failure() {
            DISPATCH_FAILURE_EXIT
        } else {
            INVOCATION_FAILURE_EXIT
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::InvalidAlert(err.to_string())
    }
}

impl From<envy::Error> for RelayError {
    fn from(err: envy::Error) -> Self {
        RelayError::ConfigurationMissing(err.to_string())
    }
}
