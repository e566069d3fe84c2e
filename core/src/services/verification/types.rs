//! Session state machine and workflow results

use std::fmt;
use uuid::Uuid;

use crate::domain::entities::{RequestedVerification, VerificationHandle};
use crate::domain::value_objects::{PromptError, PromptState, UiState};
use crate::errors::ThreepidError;

/// Identifies one verification code request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// State of a verification session
///
/// ```text
/// Idle --start--> Requesting --ok--> Prompting --code--> Submitting --ok--> Verified
///                     |                 |    ^               |
///                     +--err--> Idle    |    +------err------+
///                                       +--cancel--> Cancelled
/// ```
///
/// `Verified` and `Cancelled` end one attempt; a new one may start from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Requesting {
        attempt: AttemptId,
    },
    Prompting {
        handle: VerificationHandle,
        msisdn: String,
        prompt: PromptState,
    },
    Submitting {
        handle: VerificationHandle,
        msisdn: String,
    },
    Verified,
    Cancelled,
}

/// Inputs to the state machine
///
/// Responses carry the attempt or handle they belong to. An event whose
/// attempt or handle is not the current one is rejected.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Start {
        attempt: AttemptId,
    },
    RequestSucceeded {
        attempt: AttemptId,
        verification: RequestedVerification,
    },
    RequestFailed {
        attempt: AttemptId,
    },
    CodeSubmitted {
        handle: VerificationHandle,
    },
    SubmitSucceeded {
        handle: VerificationHandle,
    },
    SubmitFailed {
        handle: VerificationHandle,
        error: PromptError,
    },
    /// `None` cancels whatever prompt is outstanding
    Cancel {
        handle: Option<VerificationHandle>,
    },
    Teardown,
}

impl SessionState {
    /// Next state for `event`, or `None` if the event does not apply
    pub fn transition(&self, event: SessionEvent) -> Option<SessionState> {
        use SessionEvent as E;
        use SessionState as S;

        match (self, event) {
            (S::Idle | S::Verified | S::Cancelled, E::Start { attempt }) => {
                Some(S::Requesting { attempt })
            }
            (S::Requesting { attempt: current }, E::RequestSucceeded { attempt, verification })
                if *current == attempt =>
            {
                Some(S::Prompting {
                    handle: verification.handle,
                    msisdn: verification.msisdn,
                    prompt: PromptState::new(),
                })
            }
            (S::Requesting { attempt: current }, E::RequestFailed { attempt })
                if *current == attempt =>
            {
                Some(S::Idle)
            }
            (S::Prompting { handle: current, msisdn, .. }, E::CodeSubmitted { handle })
                if *current == handle =>
            {
                Some(S::Submitting {
                    handle,
                    msisdn: msisdn.clone(),
                })
            }
            (S::Submitting { handle: current, .. }, E::SubmitSucceeded { handle })
                if *current == handle =>
            {
                Some(S::Verified)
            }
            (S::Submitting { handle: current, msisdn }, E::SubmitFailed { handle, error })
                if *current == handle =>
            {
                Some(S::Prompting {
                    handle,
                    msisdn: msisdn.clone(),
                    prompt: PromptState::with_error(error),
                })
            }
            (
                S::Prompting { handle: current, .. } | S::Submitting { handle: current, .. },
                E::Cancel { handle },
            ) if handle.as_ref().map_or(true, |handle| handle == current) => Some(S::Cancelled),
            (S::Requesting { .. } | S::Prompting { .. } | S::Submitting { .. }, E::Teardown) => {
                Some(S::Cancelled)
            }
            _ => None,
        }
    }

    /// True from the code request until success, cancellation or failure
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            SessionState::Requesting { .. }
                | SessionState::Prompting { .. }
                | SessionState::Submitting { .. }
        )
    }

    pub fn active_handle(&self) -> Option<&VerificationHandle> {
        match self {
            SessionState::Prompting { handle, .. } | SessionState::Submitting { handle, .. } => {
                Some(handle)
            }
            _ => None,
        }
    }

    pub fn ui_state(&self) -> UiState {
        match self {
            SessionState::Idle | SessionState::Verified | SessionState::Cancelled => UiState::Idle,
            SessionState::Requesting { .. } | SessionState::Submitting { .. } => UiState::Busy,
            SessionState::Prompting { .. } => UiState::AwaitingCode,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Requesting { .. } => "requesting",
            SessionState::Prompting { .. } => "prompting",
            SessionState::Submitting { .. } => "submitting",
            SessionState::Verified => "verified",
            SessionState::Cancelled => "cancelled",
        }
    }
}

/// How a code prompt loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Verified,
    Cancelled,
    /// The session moved on without this loop (cancelled or torn down from outside)
    Abandoned,
}

/// How one `start` call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The number was verified and bound to the account
    Verified,
    /// The user dismissed the code prompt
    Cancelled,
    /// The input was rejected or the code request failed; the session is idle again
    Failed(ThreepidError),
    /// The session was cancelled or torn down while this call was suspended;
    /// the late response was dropped
    Abandoned,
}
