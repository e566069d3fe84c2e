//! Code prompt retry loop

use threepid_shared::utils::phone::mask_phone_number;

use crate::domain::entities::VerificationHandle;
use crate::domain::value_objects::{CodeEntry, CodePrompt, PromptError};

use super::config::VerificationSessionConfig;
use super::machine::StateMachine;
use super::traits::{PresentationPort, ThirdPartyIdentifierClient};
use super::types::{PromptOutcome, SessionEvent, SessionState};

/// Asks for the code and submits it until it is accepted or the user gives up
///
/// Every failed submission, whatever its kind, leads back to the prompt with
/// the failure attached. There is no retry limit.
pub struct VerificationPrompt<'a, C: ?Sized, P: ?Sized> {
    client: &'a C,
    presentation: &'a P,
    machine: &'a StateMachine,
    config: &'a VerificationSessionConfig,
    handle: VerificationHandle,
    msisdn: String,
}

impl<'a, C, P> VerificationPrompt<'a, C, P>
where
    C: ThirdPartyIdentifierClient + ?Sized,
    P: PresentationPort + ?Sized,
{
    pub fn new(
        client: &'a C,
        presentation: &'a P,
        machine: &'a StateMachine,
        config: &'a VerificationSessionConfig,
        handle: VerificationHandle,
        msisdn: impl Into<String>,
    ) -> Self {
        Self {
            client,
            presentation,
            machine,
            config,
            handle,
            msisdn: msisdn.into(),
        }
    }

    /// Run the loop; the session must be prompting for this loop's handle
    ///
    /// Reaching `Verified` is not reported through `state_changed`; the owner
    /// announces it once the form has been reset.
    pub async fn run(self) -> PromptOutcome {
        loop {
            let prior_error = match self.machine.current() {
                SessionState::Prompting { handle, prompt, .. } if handle == self.handle => {
                    prompt.last_error().cloned()
                }
                other => {
                    tracing::debug!(
                        state = other.name(),
                        sid = self.handle.sid(),
                        "Session no longer prompting for this handle"
                    );
                    return PromptOutcome::Abandoned;
                }
            };

            let prompt = CodePrompt::new(
                self.msisdn.clone(),
                prior_error,
                self.config.prompt_title.clone(),
                self.config.submit_label.clone(),
            );

            let code = match self.presentation.prompt_for_code(&prompt).await {
                CodeEntry::Submitted(code) => code,
                CodeEntry::Cancelled => return self.cancel(),
            };

            if !self.machine.advance(
                SessionEvent::CodeSubmitted {
                    handle: self.handle.clone(),
                },
                self.presentation,
            ) {
                tracing::debug!(
                    sid = self.handle.sid(),
                    event = "stale_code_dropped",
                    "Dropping code entered for a discarded handle"
                );
                return PromptOutcome::Abandoned;
            }
            self.presentation.show_spinner();

            match self
                .client
                .submit_verification_token(&self.handle, code.trim())
                .await
            {
                Ok(()) => {
                    let verified = self.machine.apply(SessionEvent::SubmitSucceeded {
                        handle: self.handle.clone(),
                    });
                    if verified.is_none() {
                        tracing::info!(
                            sid = self.handle.sid(),
                            event = "stale_response_dropped",
                            "Ignoring verification success for a discarded handle"
                        );
                        return PromptOutcome::Abandoned;
                    }

                    tracing::info!(
                        phone = %mask_phone_number(&self.msisdn),
                        event = "threepid_verified",
                        "Phone number verified"
                    );
                    return PromptOutcome::Verified;
                }
                Err(error) => {
                    tracing::warn!(
                        phone = %mask_phone_number(&self.msisdn),
                        error = %error,
                        kind = ?error.kind(),
                        event = "token_submission_failed",
                        "Verification code rejected, prompting again"
                    );

                    let prompt_error = PromptError::from_submission_failure(
                        &error,
                        &self.config.incorrect_code_message,
                    );
                    if !self.machine.advance(
                        SessionEvent::SubmitFailed {
                            handle: self.handle.clone(),
                            error: prompt_error,
                        },
                        self.presentation,
                    ) {
                        tracing::debug!(
                            sid = self.handle.sid(),
                            event = "stale_response_dropped",
                            "Ignoring submission failure for a discarded handle"
                        );
                        return PromptOutcome::Abandoned;
                    }
                }
            }
        }
    }

    fn cancel(&self) -> PromptOutcome {
        let cancelled = self.machine.advance(
            SessionEvent::Cancel {
                handle: Some(self.handle.clone()),
            },
            self.presentation,
        );

        if cancelled {
            tracing::info!(
                phone = %mask_phone_number(&self.msisdn),
                event = "verification_cancelled",
                "User dismissed the verification code prompt"
            );
            PromptOutcome::Cancelled
        } else {
            PromptOutcome::Abandoned
        }
    }
}
