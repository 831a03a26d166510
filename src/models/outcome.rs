use crate::models::failure::FailureState;

/// What a failure relay invocation did, handed to the host adapter so it can
/// decide how much of it to surface.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureRelayOutcome {
    Published {
        state: FailureState,
        message_id: Option<String>,
    },
    NoFailureState,
    Failed {
        reason: String,
    },
}

impl FailureRelayOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, FailureRelayOutcome::Failed { .. })
    }

    /// The host always sees success; a failure only reaches the logs.
    pub fn exit_code(&self) -> u8 {
        0
    }
}
