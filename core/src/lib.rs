//! # Threepid Core
//!
//! Core workflow and domain layer for attaching a phone number to an account
//! and verifying it with an SMS one-time code.
//! This crate contains domain entities, value objects, the verification
//! session and prompt services, the ports they drive, and error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
