use std::process::ExitCode;

use anyhow::{Context, Result};
use stack_event_relay::{
    clients::{slack::SlackClient, ssm::SsmParameterStore},
    config::AlertRelayConfig,
    error::{INVOCATION_FAILURE_EXIT, RelayError},
    handlers::handle_alert_event,
    models::{alert::AlertTransformer, event::SnsEvent},
    utils::init_tracing,
};
use tokio::io::AsyncReadExt;
use tracing::{error, info};

async fn read_event() -> Result<SnsEvent> {
    let mut payload = String::new();
    tokio::io::stdin()
        .read_to_string(&mut payload)
        .await
        .context("Failed to read notification from stdin")?;

    Ok(SnsEvent::from_json(&payload)?)
}

async fn run() -> Result<()> {
    let config = AlertRelayConfig::load()?;
    let event = read_event().await?;

    let secret_store = SsmParameterStore::connect(&config).await;
    let slack_client = SlackClient::new(config.webhook_timeout())?;

    handle_alert_event(
        &event,
        &secret_store,
        &config.slack_webhook_url_aws_ssm_parameter_name,
        &slack_client,
        &AlertTransformer::default(),
    )
    .await?;

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    let code = err
        .downcast_ref::<RelayError>()
        .map(RelayError::exit_code)
        .unwrap_or(INVOCATION_FAILURE_EXIT);

    ExitCode::from(code)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    info!("Alert relay started");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Alert relay failed");
            exit_code(&e)
        }
    }
}
