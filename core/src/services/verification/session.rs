//! Verification session: the add/verify/cancel lifecycle of one phone number

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use threepid_shared::errors::IntoErrorNotice;
use threepid_shared::utils::phone::mask_phone_number;
use threepid_shared::utils::validation::Validate;

use crate::domain::entities::{CountryCode, PhoneInput, VerificationHandle};
use crate::domain::value_objects::{UiState, View};
use crate::errors::{DomainError, DomainResult, ThreepidError};

use super::config::{VerificationSessionConfig, BIND_ON_ADD};
use super::machine::StateMachine;
use super::prompt::VerificationPrompt;
use super::traits::{PresentationPort, ThirdPartyIdentifierClient, ThreepidAddedListener};
use super::types::{AttemptId, PromptOutcome, SessionEvent, SessionOutcome, SessionState};

/// Single source of truth for the add-phone-number widget
///
/// Owns the form input and the state machine. All methods take `&self`, so
/// `cancel` and `teardown` can run while `start` is suspended on the network
/// or on the user.
pub struct VerificationSession<C: ThirdPartyIdentifierClient, P: PresentationPort> {
    /// Identity server client
    client: Arc<C>,
    /// Dialogs, spinner and code prompt
    presentation: Arc<P>,
    /// Host callback for verified numbers
    listener: Option<Arc<dyn ThreepidAddedListener>>,
    /// Session configuration
    config: VerificationSessionConfig,
    machine: StateMachine,
    input: Mutex<PhoneInput>,
}

impl<C: ThirdPartyIdentifierClient, P: PresentationPort> VerificationSession<C, P> {
    /// Create a new verification session
    ///
    /// # Arguments
    ///
    /// * `client` - Identity server client implementation
    /// * `presentation` - Presentation layer implementation
    /// * `config` - Session configuration
    pub fn new(client: Arc<C>, presentation: Arc<P>, config: VerificationSessionConfig) -> Self {
        Self {
            client,
            presentation,
            listener: None,
            config,
            machine: StateMachine::new(),
            input: Mutex::new(PhoneInput::default()),
        }
    }

    /// Register the callback fired when a number has been added
    pub fn with_listener(mut self, listener: Arc<dyn ThreepidAddedListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn state(&self) -> SessionState {
        self.machine.current()
    }

    pub fn ui_state(&self) -> UiState {
        self.machine.current().ui_state()
    }

    pub fn is_pending(&self) -> bool {
        self.machine.current().is_pending()
    }

    pub fn active_handle(&self) -> Option<VerificationHandle> {
        self.machine.current().active_handle().cloned()
    }

    pub fn phone_input(&self) -> PhoneInput {
        self.input().clone()
    }

    /// What the host should render
    pub fn view(&self) -> View {
        if self.ui_state() == UiState::Busy {
            View::Spinner
        } else if self.client.is_guest() {
            View::Hidden
        } else {
            let input = self.phone_input();
            View::Form {
                country: input.country,
                number: input.number,
            }
        }
    }

    /// Country dropdown changed
    pub fn set_country(&self, country: Option<CountryCode>) {
        self.input().country = country;
    }

    /// Country dropdown changed, given as a raw code
    pub fn set_country_code(&self, code: &str) -> DomainResult<()> {
        let country = CountryCode::parse(code)?;
        self.set_country(Some(country));
        Ok(())
    }

    /// Phone number field changed
    pub fn set_phone_number(&self, number: impl Into<String>) {
        self.input().number = number.into();
    }

    /// Form submitted: start verifying the current input
    pub async fn submit(&self) -> DomainResult<SessionOutcome> {
        let input = self.phone_input();
        self.start(input.country, &input.number).await
    }

    /// Phone number field finished editing
    ///
    /// Submits only when the field reports `should_submit` (e.g. Enter pressed).
    pub async fn on_edit_finished(&self, should_submit: bool) -> DomainResult<Option<SessionOutcome>> {
        if !should_submit {
            return Ok(None);
        }
        self.submit().await.map(Some)
    }

    /// Request a verification code and run the code prompt until the number
    /// is verified, the user cancels, or the request fails
    ///
    /// # Returns
    ///
    /// * `Ok(SessionOutcome)` - How the attempt ended; client failures are
    ///   reported as `SessionOutcome::Failed` after being shown to the user
    /// * `Err(DomainError)` - A verification is already pending, or the
    ///   account is a guest
    pub async fn start(
        &self,
        country: Option<CountryCode>,
        number: &str,
    ) -> DomainResult<SessionOutcome> {
        if self.client.is_guest() {
            return Err(DomainError::GuestAccount);
        }
        if self.is_pending() {
            tracing::warn!(
                event = "verification_already_pending",
                "Ignoring request while a verification is in progress"
            );
            return Err(DomainError::AlreadyPending);
        }

        let input = PhoneInput::new(country, number);
        *self.input() = input.clone();

        if let Err(errors) = input.validate() {
            let error = ThreepidError::validation(errors.summary());
            tracing::warn!(
                error = %error,
                event = "phone_input_invalid",
                "Rejected phone number input"
            );
            self.presentation
                .show_error(&error.to_error_notice(&self.config.error_title));
            return Ok(SessionOutcome::Failed(error));
        }

        let attempt = AttemptId::new();
        if !self
            .machine
            .advance(SessionEvent::Start { attempt }, self.presentation.as_ref())
        {
            return Err(DomainError::AlreadyPending);
        }
        self.presentation.show_spinner();

        tracing::info!(
            phone = %mask_phone_number(input.trimmed_number()),
            country = input.country.as_ref().map(CountryCode::as_str),
            bind = BIND_ON_ADD,
            attempt = %attempt,
            event = "verification_requested",
            "Requesting phone number verification code"
        );

        let verification = match self
            .client
            .request_phone_verification(input.country.as_ref(), input.trimmed_number(), BIND_ON_ADD)
            .await
        {
            Ok(verification) => verification,
            Err(error) => {
                tracing::error!(
                    phone = %mask_phone_number(input.trimmed_number()),
                    kind = ?error.kind(),
                    event = "verification_request_failed",
                    "Unable to add phone number: {}",
                    error
                );
                if !self.machine.advance(
                    SessionEvent::RequestFailed { attempt },
                    self.presentation.as_ref(),
                ) {
                    return Ok(SessionOutcome::Abandoned);
                }
                self.presentation
                    .show_error(&error.to_error_notice(&self.config.error_title));
                return Ok(SessionOutcome::Failed(error));
            }
        };

        let handle = verification.handle.clone();
        let msisdn = verification.msisdn.clone();
        if !self.machine.advance(
            SessionEvent::RequestSucceeded {
                attempt,
                verification,
            },
            self.presentation.as_ref(),
        ) {
            tracing::info!(
                attempt = %attempt,
                event = "stale_response_dropped",
                "Ignoring verification handle for a discarded attempt"
            );
            return Ok(SessionOutcome::Abandoned);
        }

        let outcome = VerificationPrompt::new(
            self.client.as_ref(),
            self.presentation.as_ref(),
            &self.machine,
            &self.config,
            handle,
            msisdn,
        )
        .run()
        .await;

        Ok(match outcome {
            PromptOutcome::Verified => {
                self.input().clear_number();
                self.presentation.state_changed(self.ui_state());
                if let Some(listener) = &self.listener {
                    listener.on_threepid_added();
                }
                SessionOutcome::Verified
            }
            PromptOutcome::Cancelled => SessionOutcome::Cancelled,
            PromptOutcome::Abandoned => SessionOutcome::Abandoned,
        })
    }

    /// Abandon the outstanding code prompt
    ///
    /// Nothing is sent to the server; the transaction there expires on its own.
    pub fn cancel(&self) -> DomainResult<()> {
        if self
            .machine
            .advance(SessionEvent::Cancel { handle: None }, self.presentation.as_ref())
        {
            tracing::info!(event = "verification_cancelled", "Verification cancelled");
            Ok(())
        } else {
            Err(DomainError::NoActivePrompt)
        }
    }

    /// Component teardown: discard whatever is in flight
    pub fn teardown(&self) {
        if self
            .machine
            .advance(SessionEvent::Teardown, self.presentation.as_ref())
        {
            tracing::debug!(event = "verification_torn_down", "Discarded in-flight verification");
        }
    }

    fn input(&self) -> MutexGuard<'_, PhoneInput> {
        self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
