//! Shared utilities and common types for the phone verification workspace
//!
//! This crate provides common functionality used across all modules:
//! - Configuration types and loading
//! - Error notice structures handed to the presentation layer
//! - Utility functions (phone formatting, input validation)
//! - Tracing subscriber initialization

pub mod config;
pub mod errors;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, VerificationConfig};
pub use errors::{error_codes, ErrorNotice, IntoErrorNotice};
pub use telemetry::{init_tracing, TelemetryError};
pub use utils::{phone, validation};
