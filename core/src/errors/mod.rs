//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{ErrorKind, ThreepidError};

use thiserror::Error;

/// Misuse of the verification workflow
///
/// Client failures never surface here during a running flow; they are
/// reported through the presentation port and returned as data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("A phone number verification is already in progress")]
    AlreadyPending,

    #[error("No verification code prompt is outstanding")]
    NoActivePrompt,

    #[error("Guest accounts cannot add phone numbers")]
    GuestAccount,

    #[error(transparent)]
    Threepid(#[from] ThreepidError),
}

pub type DomainResult<T> = Result<T, DomainError>;
