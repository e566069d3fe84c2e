//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    PresentationPort, SessionOutcome, SessionState, ThirdPartyIdentifierClient,
    ThreepidAddedListener, VerificationPrompt, VerificationSession, VerificationSessionConfig,
    BIND_ON_ADD,
};
