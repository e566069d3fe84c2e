//! Phone number add-and-verify workflow
//!
//! This module provides the complete client-side verification flow:
//! - Requesting an SMS code for a phone number (always binding it to the account)
//! - Prompting the user for the code, with the previous failure attached
//! - Retrying on any submission failure without losing the handle
//! - Cancellation and teardown, dropping responses for discarded handles

mod config;
mod machine;
mod prompt;
mod session;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::{VerificationSessionConfig, BIND_ON_ADD};
pub use machine::StateMachine;
pub use prompt::VerificationPrompt;
pub use session::VerificationSession;
pub use traits::{PresentationPort, ThirdPartyIdentifierClient, ThreepidAddedListener};
pub use types::{AttemptId, PromptOutcome, SessionEvent, SessionOutcome, SessionState};
