use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use anyhow::Result;
use stack_event_relay::{
    clients::publisher::{PublishReceipt, RetryingPublisher},
    error::RelayError,
    models::retry::RetryConfig,
    utils::retry_on_rate_limit,
};
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};
use tracing_test::traced_test;

use crate::common::{ScriptedPublisher, TOPIC_ARN, access_denied, rate_limited, receipt};

async fn publisher_with(
    responses: Vec<Result<PublishReceipt, RelayError>>,
) -> Result<(RetryingPublisher<ScriptedPublisher>, ScriptedPublisher)> {
    let scripted = ScriptedPublisher::new(responses);
    let client = scripted.clone();

    let publisher = RetryingPublisher::create(RetryConfig::default(), move || {
        let client = client.clone();
        async move { Ok::<_, RelayError>(client) }
    })
    .await?;

    Ok((publisher, scripted))
}

/// Test: Default policy is three retries three seconds apart
#[test]
fn test_default_policy_is_fixed() {
    let config = RetryConfig::default();

    assert_eq!(config.max_retries, 3);
    assert_eq!(config.max_attempts(), 4);
    assert_eq!(config.delay(), Duration::from_secs(3));
}

/// Test: Successful publish completes without retry or sleep
#[tokio::test(start_paused = true)]
async fn test_successful_publish_no_retry() -> Result<()> {
    let (publisher, scripted) = publisher_with(vec![Ok(receipt("m-1"))]).await?;

    let start = Instant::now();
    let result = publisher.publish("subject", "body", TOPIC_ARN).await?;

    assert_eq!(result, receipt("m-1"));
    assert_eq!(scripted.attempts(), 1, "Should only attempt once");
    assert_eq!(start.elapsed(), Duration::ZERO);

    Ok(())
}

/// Test: Rate limiting on attempts 1-3 and success on attempt 4 sleeps exactly three times
#[tokio::test(start_paused = true)]
async fn test_rate_limited_three_times_then_succeeds() -> Result<()> {
    let (publisher, scripted) = publisher_with(vec![
        Err(rate_limited()),
        Err(rate_limited()),
        Err(rate_limited()),
        Ok(receipt("m-4")),
    ])
    .await?;

    let start = Instant::now();
    let result = publisher.publish("subject", "body", TOPIC_ARN).await?;
    let elapsed = start.elapsed();

    assert_eq!(result, receipt("m-4"));
    assert_eq!(scripted.attempts(), 4);
    assert!(
        elapsed >= Duration::from_secs(9) && elapsed < Duration::from_secs(12),
        "Expected three 3s sleeps, waited {:?}",
        elapsed
    );

    Ok(())
}

/// Test: Rate limiting on every attempt surfaces the rate-limit error after four attempts
#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhausts_retries() -> Result<()> {
    let (publisher, scripted) = publisher_with(vec![
        Err(rate_limited()),
        Err(rate_limited()),
        Err(rate_limited()),
        Err(rate_limited()),
        Ok(receipt("never")),
    ])
    .await?;

    let start = Instant::now();
    let err = assert_err!(publisher.publish("subject", "body", TOPIC_ARN).await);
    let elapsed = start.elapsed();

    assert!(err.is_rate_limited(), "Should surface the rate-limit error, got {err}");
    assert_eq!(scripted.attempts(), 4, "Should attempt exactly four times");
    assert!(elapsed >= Duration::from_secs(9) && elapsed < Duration::from_secs(12));

    Ok(())
}

/// Test: Non-rate-limit failures are raised immediately without sleeping
#[tokio::test(start_paused = true)]
async fn test_other_failure_is_not_retried() -> Result<()> {
    let (publisher, scripted) = publisher_with(vec![Err(access_denied())]).await?;

    let start = Instant::now();
    let err = assert_err!(publisher.publish("subject", "body", TOPIC_ARN).await);

    assert!(matches!(err, RelayError::Service { .. }));
    assert_eq!(scripted.attempts(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);

    Ok(())
}

/// Test: A non-rate-limit failure after a rate limit stops the retry loop
#[tokio::test(start_paused = true)]
async fn test_other_failure_after_rate_limit_stops() -> Result<()> {
    let (publisher, scripted) =
        publisher_with(vec![Err(rate_limited()), Err(access_denied())]).await?;

    let start = Instant::now();
    let err = assert_err!(publisher.publish("subject", "body", TOPIC_ARN).await);
    let elapsed = start.elapsed();

    assert!(!err.is_rate_limited());
    assert_eq!(scripted.attempts(), 2);
    assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(6));

    Ok(())
}

/// Test: Client creation tolerates rate limiting under the same policy
#[tokio::test(start_paused = true)]
async fn test_client_creation_retries_rate_limit() -> Result<()> {
    let attempt_count = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempt_count);

    let start = Instant::now();
    let publisher = RetryingPublisher::create(RetryConfig::default(), move || {
        let counter = Arc::clone(&counter);
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(rate_limited())
            } else {
                Ok(ScriptedPublisher::default())
            }
        }
    })
    .await;

    assert_ok!(publisher);
    assert_eq!(attempt_count.load(Ordering::SeqCst), 3);
    assert!(start.elapsed() >= Duration::from_secs(6));

    Ok(())
}

/// Test: Client creation gives up after four rate-limited attempts
#[tokio::test(start_paused = true)]
async fn test_client_creation_exhausts_retries() -> Result<()> {
    let attempt_count = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempt_count);

    let result = RetryingPublisher::<ScriptedPublisher>::create(RetryConfig::default(), move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(rate_limited())
        }
    })
    .await;

    let Err(err) = result else {
        panic!("Client creation should fail");
    };
    assert!(err.is_rate_limited());
    assert_eq!(attempt_count.load(Ordering::SeqCst), 4);

    Ok(())
}

/// Test: Custom bounds are honoured by the generic retry loop
#[tokio::test(start_paused = true)]
async fn test_custom_retry_bound() -> Result<()> {
    let config = RetryConfig {
        max_retries: 1,
        delay_seconds: 5,
    };

    let attempt_count = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempt_count);

    let start = Instant::now();
    let result: Result<(), RelayError> = retry_on_rate_limit(&config, "custom", move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(rate_limited())
        }
    })
    .await;
    let elapsed = start.elapsed();

    assert_err!(result);
    assert_eq!(attempt_count.load(Ordering::SeqCst), 2);
    assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_secs(10));

    Ok(())
}

/// Test: Each retry logs its ordinal
#[tokio::test(start_paused = true)]
#[traced_test]
async fn test_each_retry_logs_its_ordinal() -> Result<()> {
    let (publisher, _) = publisher_with(vec![
        Err(rate_limited()),
        Err(rate_limited()),
        Ok(receipt("m-3")),
    ])
    .await?;

    publisher.publish("subject", "body", TOPIC_ARN).await?;

    assert!(logs_contain("Rate limited, retrying"));
    assert!(logs_contain("retry=1"));
    assert!(logs_contain("retry=2"));
    assert!(!logs_contain("retry=3"));
    assert!(logs_contain("Retry succeeded"));

    Ok(())
}
