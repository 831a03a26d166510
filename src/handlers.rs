use tracing::{error, info};

use crate::{
    clients::{
        publisher::{PublishReceipt, RetryingPublisher, TopicPublisher},
        slack::SlackClient,
        ssm::SecretStore,
    },
    error::RelayError,
    models::{
        alert::AlertTransformer,
        event::SnsEvent,
        failure::{FailureState, find_failure_state},
        outcome::FailureRelayOutcome,
        retry::RetryConfig,
    },
};

/// Forwards the notification to `topic_arn` when its body mentions a failure
/// state. Returns the matched state and receipt, or `None` when nothing
/// matched.
pub async fn relay_failure_notification<P: TopicPublisher>(
    event: &SnsEvent,
    publisher: &RetryingPublisher<P>,
    topic_arn: &str,
) -> Result<Option<(FailureState, PublishReceipt)>, RelayError> {
    let notification = event.notification()?;

    let Some(state) = find_failure_state(&notification.message) else {
        info!("No failure state found in notification");
        return Ok(None);
    };

    info!(state = %state, topic_arn, "Publishing failure notification");
    let receipt = publisher
        .publish(&state.subject(), &notification.message, topic_arn)
        .await?;

    info!(
        state = %state,
        message_id = receipt.message_id.as_deref().unwrap_or_default(),
        "Failure notification published"
    );

    Ok(Some((state, receipt)))
}

/// Full failure relay invocation. Every error is folded into
/// `FailureRelayOutcome::Failed`; the caller decides whether to surface it.
pub async fn run_failure_relay<P, F, Fut>(
    event: &SnsEvent,
    topic_arn: &str,
    retry_config: RetryConfig,
    factory: F,
) -> FailureRelayOutcome
where
    P: TopicPublisher,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<P, RelayError>>,
{
    let result = async {
        let publisher = RetryingPublisher::create(retry_config, factory).await?;
        relay_failure_notification(event, &publisher, topic_arn).await
    }
    .await;

    match result {
        Ok(Some((state, receipt))) => FailureRelayOutcome::Published {
            state,
            message_id: receipt.message_id,
        },
        Ok(None) => FailureRelayOutcome::NoFailureState,
        Err(e) => {
            error!(error = %e, "Failure relay did not complete");
            FailureRelayOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Fetches the webhook URL, redacts the alert and sends it to chat.
pub async fn handle_alert_event<S>(
    event: &SnsEvent,
    secret_store: &S,
    webhook_parameter_name: &str,
    slack_client: &SlackClient,
    transformer: &AlertTransformer,
) -> Result<(), RelayError>
where
    S: SecretStore + ?Sized,
{
    info!(parameter = webhook_parameter_name, "Fetching Slack webhook URL");
    let webhook_url = secret_store.get_secret(webhook_parameter_name).await?;

    let notification = event.notification()?;
    let body = AlertTransformer::parse_body(&notification.message)?;
    let alert = transformer.transform(notification.subject(), body);

    info!(subject = %alert.subject, "Sending the alert to Slack");
    slack_client
        .dispatch(&webhook_url, &alert.subject, &alert.formatted_body()?)
        .await
}
