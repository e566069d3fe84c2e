//! Unit tests for the code prompt retry loop

use crate::domain::entities::{RequestedVerification, VerificationHandle};
use crate::domain::value_objects::{CodeEntry, UiState};
use crate::errors::{ErrorKind, ThreepidError};
use crate::services::verification::{
    AttemptId, PromptOutcome, SessionEvent, SessionState, StateMachine, VerificationPrompt,
    VerificationSessionConfig,
};

use super::mocks::{submitted, wrong_code, MockIdentityClient, MockPresentation};

fn handle() -> VerificationHandle {
    VerificationHandle::new("sid-1", "secret")
}

fn prompting_machine() -> StateMachine {
    let machine = StateMachine::new();
    let attempt = AttemptId::new();
    machine.apply(SessionEvent::Start { attempt }).unwrap();
    machine
        .apply(SessionEvent::RequestSucceeded {
            attempt,
            verification: RequestedVerification::new(handle(), "15551234"),
        })
        .unwrap();
    machine
}

async fn run_prompt(
    client: &MockIdentityClient,
    presentation: &MockPresentation,
    machine: &StateMachine,
) -> PromptOutcome {
    let config = VerificationSessionConfig::default();
    VerificationPrompt::new(client, presentation, machine, &config, handle(), "15551234")
        .run()
        .await
}

#[tokio::test]
async fn test_prompt_succeeds_on_first_code() {
    let client = MockIdentityClient::new();
    let presentation = MockPresentation::new().with_entries(vec![submitted("123456")]);
    let machine = prompting_machine();

    let outcome = run_prompt(&client, &presentation, &machine).await;

    assert_eq!(outcome, PromptOutcome::Verified);
    assert_eq!(machine.current(), SessionState::Verified);
    assert_eq!(client.submitted_codes(), vec!["123456".to_string()]);
    assert_eq!(presentation.prompt_errors(), vec![None]);
    assert_eq!(presentation.spinner_count(), 1);
    // The owner announces the final state after resetting the form
    assert_eq!(presentation.states.lock().unwrap().clone(), vec![UiState::Busy]);
}

#[tokio::test]
async fn test_prompt_shows_phone_number_and_labels() {
    let client = MockIdentityClient::new();
    let presentation = MockPresentation::new().with_entries(vec![submitted("123456")]);
    let machine = prompting_machine();

    run_prompt(&client, &presentation, &machine).await;

    let prompts = presentation.prompts.lock().unwrap();
    assert_eq!(prompts[0].msisdn, "15551234");
    assert_eq!(prompts[0].title, "Enter Code");
    assert_eq!(prompts[0].submit_label, "Submit");
    assert!(prompts[0].description.contains("+15551234"));
}

#[tokio::test]
async fn test_wrong_code_reprompts_with_canned_message() {
    let client = MockIdentityClient::new().with_submit_results(vec![Err(wrong_code()), Ok(())]);
    let presentation =
        MockPresentation::new().with_entries(vec![submitted("000000"), submitted("123456")]);
    let machine = prompting_machine();

    let outcome = run_prompt(&client, &presentation, &machine).await;

    assert_eq!(outcome, PromptOutcome::Verified);
    assert_eq!(
        presentation.prompt_errors(),
        vec![None, Some("Incorrect verification code".to_string())]
    );

    // Both attempts went to the same handle
    let submissions = client.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 2);
    assert!(submissions.iter().all(|(h, _)| *h == handle()));
}

#[tokio::test]
async fn test_server_error_reprompts_with_raw_message() {
    let client = MockIdentityClient::new().with_submit_results(vec![
        Err(ThreepidError::from_server(
            Some("M_UNKNOWN"),
            "Session expired, request a new code",
        )),
        Ok(()),
    ]);
    let presentation =
        MockPresentation::new().with_entries(vec![submitted("123456"), submitted("654321")]);
    let machine = prompting_machine();

    let outcome = run_prompt(&client, &presentation, &machine).await;

    assert_eq!(outcome, PromptOutcome::Verified);
    let prompts = presentation.prompts.lock().unwrap();
    let error = prompts[1].prior_error.as_ref().unwrap();
    assert_eq!(error.kind, ErrorKind::Server);
    assert_eq!(error.message, "Session expired, request a new code");
}

#[tokio::test]
async fn test_network_error_during_submission_reprompts() {
    let client = MockIdentityClient::new()
        .with_submit_results(vec![Err(ThreepidError::network("connection reset")), Ok(())]);
    let presentation =
        MockPresentation::new().with_entries(vec![submitted("123456"), submitted("123456")]);
    let machine = prompting_machine();

    let outcome = run_prompt(&client, &presentation, &machine).await;

    assert_eq!(outcome, PromptOutcome::Verified);
    assert_eq!(
        presentation.prompt_errors(),
        vec![None, Some("connection reset".to_string())]
    );
}

#[tokio::test]
async fn test_retries_are_unlimited() {
    let mut results: Vec<Result<(), ThreepidError>> = (0..12).map(|_| Err(wrong_code())).collect();
    results.push(Ok(()));
    let client = MockIdentityClient::new().with_submit_results(results);
    let presentation =
        MockPresentation::new().with_entries((0..13).map(|_| submitted("000000")).collect());
    let machine = prompting_machine();

    let outcome = run_prompt(&client, &presentation, &machine).await;

    assert_eq!(outcome, PromptOutcome::Verified);
    assert_eq!(client.submitted_codes().len(), 13);
}

#[tokio::test]
async fn test_cancel_discards_handle() {
    let client = MockIdentityClient::new().with_submit_results(vec![Err(wrong_code())]);
    let presentation =
        MockPresentation::new().with_entries(vec![submitted("000000"), CodeEntry::Cancelled]);
    let machine = prompting_machine();

    let outcome = run_prompt(&client, &presentation, &machine).await;

    assert_eq!(outcome, PromptOutcome::Cancelled);
    assert_eq!(machine.current(), SessionState::Cancelled);
    assert!(machine.current().active_handle().is_none());
    assert_eq!(client.submitted_codes().len(), 1);
}

#[tokio::test]
async fn test_code_is_trimmed_before_submission() {
    let client = MockIdentityClient::new();
    let presentation = MockPresentation::new().with_entries(vec![submitted("  123456 \n")]);
    let machine = prompting_machine();

    run_prompt(&client, &presentation, &machine).await;

    assert_eq!(client.submitted_codes(), vec!["123456".to_string()]);
}

#[tokio::test]
async fn test_prompt_abandoned_when_session_moved_on() {
    let client = MockIdentityClient::new();
    let presentation = MockPresentation::new().with_entries(vec![submitted("123456")]);
    let machine = prompting_machine();
    machine.apply(SessionEvent::Teardown).unwrap();

    let outcome = run_prompt(&client, &presentation, &machine).await;

    assert_eq!(outcome, PromptOutcome::Abandoned);
    assert!(presentation.prompts.lock().unwrap().is_empty());
    assert!(client.submitted_codes().is_empty());
}
