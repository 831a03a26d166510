use std::process::ExitCode;

use anyhow::{Context, Result};
use stack_event_relay::{
    clients::sns::SnsPublisher,
    config::FailureRelayConfig,
    handlers::run_failure_relay,
    models::{event::SnsEvent, outcome::FailureRelayOutcome},
    utils::init_tracing,
};
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};

async fn read_event() -> Result<SnsEvent> {
    let mut payload = String::new();
    tokio::io::stdin()
        .read_to_string(&mut payload)
        .await
        .context("Failed to read notification from stdin")?;

    Ok(SnsEvent::from_json(&payload)?)
}

async fn run() -> Result<FailureRelayOutcome> {
    let config = FailureRelayConfig::load()?;
    let event = read_event().await?;

    Ok(run_failure_relay(
        &event,
        &config.failure_sns_topic_arn,
        config.retry_config(),
        SnsPublisher::connect,
    )
    .await)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    info!("Failure relay started");

    let outcome = match run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failure relay aborted");
            FailureRelayOutcome::Failed {
                reason: format!("{e:#}"),
            }
        }
    };

    if outcome.is_success() {
        info!(?outcome, "Failure relay finished");
    } else {
        warn!(?outcome, "Failure relay finished without publishing");
    }

    ExitCode::from(outcome.exit_code())
}
