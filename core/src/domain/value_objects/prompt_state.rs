//! Code prompt state carried across retries, and the prompt shown to the user.

use serde::{Deserialize, Serialize};

use threepid_shared::utils::phone::format_msisdn;

use crate::errors::{ErrorKind, ThreepidError};

/// Why the previous code submission failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptError {
    pub kind: ErrorKind,
    /// User-facing message
    pub message: String,
}

impl PromptError {
    /// Build the message shown after a failed submission
    ///
    /// Wrong codes get the canned `incorrect_code_message`; every other
    /// failure shows the raw message reported by the server.
    pub fn from_submission_failure(error: &ThreepidError, incorrect_code_message: &str) -> Self {
        let message = match error {
            ThreepidError::WrongCode { .. } => incorrect_code_message.to_string(),
            other => other.message().to_string(),
        };
        Self {
            kind: error.kind(),
            message,
        }
    }
}

/// Prompt context scoped to one verification handle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    last_error: Option<PromptError>,
}

impl PromptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(error: PromptError) -> Self {
        Self {
            last_error: Some(error),
        }
    }

    pub fn last_error(&self) -> Option<&PromptError> {
        self.last_error.as_ref()
    }
}

/// Code-entry surface the presentation layer is asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePrompt {
    /// Number the code was sent to, without leading `+`
    pub msisdn: String,
    /// Failure of the previous submission, if any
    pub prior_error: Option<PromptError>,
    pub title: String,
    pub description: String,
    pub submit_label: String,
}

impl CodePrompt {
    pub fn new(
        msisdn: impl Into<String>,
        prior_error: Option<PromptError>,
        title: impl Into<String>,
        submit_label: impl Into<String>,
    ) -> Self {
        let msisdn = msisdn.into();
        let description = format!(
            "A text message has been sent to {}. Please enter the verification code it contains",
            format_msisdn(&msisdn)
        );
        Self {
            msisdn,
            prior_error,
            title: title.into(),
            description,
            submit_label: submit_label.into(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.prior_error.as_ref().map(|error| error.message.as_str())
    }
}

/// What the user did with the code prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeEntry {
    /// The user entered a code and pressed submit
    Submitted(String),
    /// The user dismissed the prompt
    Cancelled,
}
