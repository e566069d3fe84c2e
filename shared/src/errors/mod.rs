//! Shared error types and notice structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error payload handed to the presentation layer
///
/// Rendered by the host as a dialog (request failures) or inline message
/// (validation failures).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorNotice {
    /// Error code for client identification
    pub error: String,

    /// Dialog title
    pub title: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (server errcode, field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorNotice {
    /// Create a new error notice
    pub fn new(
        error: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            title: title.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error notice
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }

    /// Look up a detail field
    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.as_ref().and_then(|details| details.get(key))
    }
}

/// Error codes used across the workspace
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const VERIFICATION_CODE_INVALID: &str = "VERIFICATION_CODE_INVALID";

    /// Matrix errcode reported when a submitted verification token is wrong
    pub const M_THREEPID_AUTH_FAILED: &str = "M_THREEPID_AUTH_FAILED";
}

/// Trait for converting errors to an [`ErrorNotice`]
pub trait IntoErrorNotice {
    fn to_error_notice(&self, title: &str) -> ErrorNotice;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_details() {
        let notice = ErrorNotice::new(error_codes::SERVER_ERROR, "Error", "Boom")
            .add_detail("errcode", "M_UNKNOWN");

        assert_eq!(notice.title, "Error");
        assert_eq!(notice.message, "Boom");
        assert_eq!(
            notice.detail("errcode"),
            Some(&serde_json::Value::String("M_UNKNOWN".to_string()))
        );
        assert!(notice.detail("missing").is_none());
    }

    #[test]
    fn test_error_notice_serialization_skips_empty_details() {
        let notice = ErrorNotice::new(error_codes::NETWORK_ERROR, "Error", "offline");
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["error"], "NETWORK_ERROR");
        assert!(json.get("details").is_none());
    }
}
