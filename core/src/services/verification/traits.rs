//! Ports driven by the verification workflow

use async_trait::async_trait;

use threepid_shared::errors::ErrorNotice;

use crate::domain::entities::{CountryCode, RequestedVerification, VerificationHandle};
use crate::domain::value_objects::{CodeEntry, CodePrompt, UiState};
use crate::errors::ThreepidError;

/// Identity/home-server client performing the network calls
#[async_trait]
pub trait ThirdPartyIdentifierClient: Send + Sync {
    /// Ask the server to text a verification code to the number
    ///
    /// Fails with `Network`, `Validation` or `Server`.
    async fn request_phone_verification(
        &self,
        country: Option<&CountryCode>,
        number: &str,
        bind: bool,
    ) -> Result<RequestedVerification, ThreepidError>;

    /// Submit the code the user received
    ///
    /// Fails with `WrongCode`, `Network` or `Server`.
    async fn submit_verification_token(
        &self,
        handle: &VerificationHandle,
        token: &str,
    ) -> Result<(), ThreepidError>;

    /// Whether the logged-in account is a guest
    fn is_guest(&self) -> bool {
        false
    }
}

/// Dialogs, spinners and the code-entry surface
#[async_trait]
pub trait PresentationPort: Send + Sync {
    fn show_spinner(&self);

    fn show_error(&self, notice: &ErrorNotice);

    /// Show the code prompt and wait for the user
    async fn prompt_for_code(&self, prompt: &CodePrompt) -> CodeEntry;

    /// Called after every state transition
    fn state_changed(&self, _state: UiState) {}
}

/// Host callback fired once a phone number has been verified and added
pub trait ThreepidAddedListener: Send + Sync {
    fn on_threepid_added(&self);
}

impl<F> ThreepidAddedListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_threepid_added(&self) {
        self()
    }
}
