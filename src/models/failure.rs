use std::fmt::{Display, Formatter, Result};

/// CloudFormation stack states worth forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    CreateFailed,
    DeleteFailed,
    RollbackInProgress,
    UpdateRollbackInProgress,
}

impl FailureState {
    /// Match priority. The first state found anywhere in the body wins,
    /// wherever it sits in the text.
    pub const PRIORITY: [FailureState; 4] = [
        FailureState::CreateFailed,
        FailureState::DeleteFailed,
        FailureState::RollbackInProgress,
        FailureState::UpdateRollbackInProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureState::CreateFailed => "CREATE_FAILED",
            FailureState::DeleteFailed => "DELETE_FAILED",
            FailureState::RollbackInProgress => "ROLLBACK_IN_PROGRESS",
            FailureState::UpdateRollbackInProgress => "UPDATE_ROLLBACK_IN_PROGRESS",
        }
    }

    pub fn subject(&self) -> String {
        format!("CloudFormation Stack is in {}", self.as_str())
    }
}

impl Display for FailureState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scans a raw notification body for a known failure state. The body is
/// treated as opaque text.
pub fn find_failure_state(body: &str) -> Option<FailureState> {
    FailureState::PRIORITY
        .into_iter()
        .find(|state| contains_state(body, *state))
}

/// Substring match, except that an occurrence lying entirely inside an
/// occurrence of a longer listed state does not count. `ROLLBACK_IN_PROGRESS`
/// inside `UPDATE_ROLLBACK_IN_PROGRESS` is not a rollback.
fn contains_state(body: &str, state: FailureState) -> bool {
    let needle = state.as_str();

    body.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();

        !FailureState::PRIORITY
            .iter()
            .map(FailureState::as_str)
            .filter(|longer| longer.len() > needle.len() && longer.contains(needle))
            .any(|longer| {
                body.match_indices(longer).any(|(outer_start, _)| {
                    outer_start <= start && end <= outer_start + longer.len()
                })
            })
    })
}
