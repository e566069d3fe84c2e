//! Phone verification flow configuration

use serde::{Deserialize, Serialize};

/// User-facing strings of the add-phone-number flow
///
/// Whether a verified number gets bound to the account is not part of this
/// configuration; the flow always binds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Shown in the code prompt after the server rejected a code
    #[serde(default = "default_incorrect_code_message")]
    pub incorrect_code_message: String,

    /// Title of the dialog reporting a failed verification request
    #[serde(default = "default_error_title")]
    pub error_title: String,

    /// Title of the code-entry prompt
    #[serde(default = "default_prompt_title")]
    pub prompt_title: String,

    /// Label of the code-entry prompt's submit button
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            incorrect_code_message: default_incorrect_code_message(),
            error_title: default_error_title(),
            prompt_title: default_prompt_title(),
            submit_label: default_submit_label(),
        }
    }
}

fn default_incorrect_code_message() -> String {
    String::from("Incorrect verification code")
}

fn default_error_title() -> String {
    String::from("Error")
}

fn default_prompt_title() -> String {
    String::from("Enter Code")
}

fn default_submit_label() -> String {
    String::from("Submit")
}
