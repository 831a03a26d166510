use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::json;
use stack_event_relay::{
    clients::{
        publisher::{PublishReceipt, TopicPublisher},
        ssm::SecretStore,
    },
    error::RelayError,
    models::event::SnsEvent,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PublishCall {
    pub subject: String,
    pub message: String,
    pub topic_arn: String,
}

/// Publisher that replays scripted results and records every attempt.
/// Once the script runs out every call succeeds.
#[derive(Clone, Default)]
pub struct ScriptedPublisher {
    responses: Arc<Mutex<VecDeque<Result<PublishReceipt, RelayError>>>>,
    calls: Arc<Mutex<Vec<PublishCall>>>,
}

impl ScriptedPublisher {
    pub fn new(responses: Vec<Result<PublishReceipt, RelayError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TopicPublisher for ScriptedPublisher {
    async fn publish(
        &self,
        subject: &str,
        message: &str,
        topic_arn: &str,
    ) -> Result<PublishReceipt, RelayError> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(PublishCall {
                subject: subject.to_string(),
                message: message.to_string(),
                topic_arn: topic_arn.to_string(),
            });
            calls.len()
        };

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(receipt(&format!("msg-{attempt}"))))
    }
}

#[derive(Default)]
pub struct StaticSecretStore {
    values: HashMap<String, String>,
}

impl StaticSecretStore {
    pub fn with(name: &str, value: &str) -> Self {
        Self {
            values: HashMap::from([(name.to_string(), value.to_string())]),
        }
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, RelayError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| RelayError::ConfigurationMissing(format!("parameter {name} not found")))
    }
}

pub const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:stack-failures";

pub fn receipt(message_id: &str) -> PublishReceipt {
    PublishReceipt {
        message_id: Some(message_id.to_string()),
    }
}

pub fn rate_limited() -> RelayError {
    RelayError::RateLimited {
        service: "sns".to_string(),
        message: "Rate exceeded".to_string(),
    }
}

pub fn access_denied() -> RelayError {
    RelayError::Service {
        service: "sns".to_string(),
        code: "AuthorizationError".to_string(),
        message: "User is not authorized to perform SNS:Publish".to_string(),
    }
}

pub fn sns_event(subject: Option<&str>, message: &str) -> SnsEvent {
    serde_json::from_value(json!({
        "Records": [{
            "EventSource": "aws:sns",
            "Sns": {
                "Type": "Notification",
                "Subject": subject,
                "Message": message,
            }
        }]
    }))
    .expect("valid SNS envelope")
}

pub fn stack_event_body(status: &str) -> String {
    format!(
        "StackId='arn:aws:cloudformation:us-east-1:123456789012:stack/web/1'\n\
         LogicalResourceId='web'\n\
         ResourceStatus='{status}'\n\
         ResourceType='AWS::CloudFormation::Stack'\n"
    )
}
