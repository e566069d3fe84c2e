//! Domain entities representing core business objects.

pub mod phone_input;
pub mod verification_handle;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use phone_input::{CountryCode, PhoneInput};
pub use verification_handle::{RequestedVerification, VerificationHandle};
