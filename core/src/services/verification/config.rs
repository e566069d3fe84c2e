//! Configuration for the verification session

use threepid_shared::config::VerificationConfig;

/// Phone numbers added through this flow are always bound to the account.
/// This is policy, not configuration.
pub const BIND_ON_ADD: bool = true;

/// Configuration for the verification session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSessionConfig {
    /// Prompt message shown after the server rejected a code
    pub incorrect_code_message: String,
    /// Title of the dialog reporting a failed code request
    pub error_title: String,
    /// Title of the code-entry prompt
    pub prompt_title: String,
    /// Label of the code-entry prompt's submit button
    pub submit_label: String,
}

impl Default for VerificationSessionConfig {
    fn default() -> Self {
        VerificationConfig::default().into()
    }
}

impl From<VerificationConfig> for VerificationSessionConfig {
    fn from(config: VerificationConfig) -> Self {
        Self {
            incorrect_code_message: config.incorrect_code_message,
            error_title: config.error_title,
            prompt_title: config.prompt_title,
            submit_label: config.submit_label,
        }
    }
}
