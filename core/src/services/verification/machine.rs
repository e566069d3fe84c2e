//! Shared holder of the session state value

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::traits::PresentationPort;
use super::types::{SessionEvent, SessionState};

/// Holds the current [`SessionState`] and applies events to it atomically
///
/// The lock is only taken for a check-and-replace and is never held across
/// an `.await`.
#[derive(Debug)]
pub struct StateMachine {
    state: Mutex<SessionState>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::Idle),
        }
    }

    /// Snapshot of the current state
    pub fn current(&self) -> SessionState {
        self.lock().clone()
    }

    /// Apply `event`, returning the new state
    ///
    /// Returns `None` and leaves the state untouched when the event does not
    /// apply, e.g. a late response for a discarded handle.
    pub fn apply(&self, event: SessionEvent) -> Option<SessionState> {
        let mut state = self.lock();
        let event_name = event_name(&event);
        match state.transition(event) {
            Some(next) => {
                tracing::debug!(
                    from = state.name(),
                    to = next.name(),
                    event = event_name,
                    "Verification session transition"
                );
                *state = next.clone();
                Some(next)
            }
            None => {
                tracing::debug!(
                    state = state.name(),
                    event = event_name,
                    "Dropping event that does not apply to the current state"
                );
                None
            }
        }
    }

    /// Apply `event` and tell the presentation layer about the new state
    pub(crate) fn advance<P>(&self, event: SessionEvent, presentation: &P) -> bool
    where
        P: PresentationPort + ?Sized,
    {
        match self.apply(event) {
            Some(next) => {
                presentation.state_changed(next.ui_state());
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::Start { .. } => "start",
        SessionEvent::RequestSucceeded { .. } => "request_succeeded",
        SessionEvent::RequestFailed { .. } => "request_failed",
        SessionEvent::CodeSubmitted { .. } => "code_submitted",
        SessionEvent::SubmitSucceeded { .. } => "submit_succeeded",
        SessionEvent::SubmitFailed { .. } => "submit_failed",
        SessionEvent::Cancel { .. } => "cancel",
        SessionEvent::Teardown => "teardown",
    }
}
