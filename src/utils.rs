use tokio::time::sleep;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{error::RelayError, models::retry::RetryConfig};

/// Installs the JSON log subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = fmt().json().with_env_filter(filter).try_init() {
        debug!(error = %e, "Tracing subscriber already installed");
    }
}

/// Runs `operation`, retrying only rate-limit failures with a fixed delay.
/// Any other failure is returned immediately, and the last rate-limit error
/// is returned once the retries are used up.
pub async fn retry_on_rate_limit<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, RelayError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RelayError>>,
{
    let mut retries = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if retries > 0 {
                    info!(
                        operation = operation_name,
                        attempt = retries + 1,
                        max_attempts = config.max_attempts(),
                        "Retry succeeded"
                    );
                }
                return Ok(result);
            }
            Err(e) if e.is_rate_limited() && retries < config.max_retries => {
                retries += 1;

                warn!(
                    operation = operation_name,
                    retry = retries,
                    max_retries = config.max_retries,
                    delay_seconds = config.delay_seconds,
                    error = %e,
                    "Rate limited, retrying"
                );

                sleep(config.delay()).await;
            }
            Err(e) => {
                if e.is_rate_limited() {
                    warn!(
                        operation = operation_name,
                        max_attempts = config.max_attempts(),
                        error = %e,
                        "Still rate limited after exhausting all retries"
                    );
                }
                return Err(e);
            }
        }
    }
}
