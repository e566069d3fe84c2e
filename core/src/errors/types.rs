//! Failures reported by the identity server client
//!
//! These are data for the workflow: they are shown to the user and, during
//! code submission, lead back to the code prompt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use threepid_shared::errors::{error_codes, ErrorNotice, IntoErrorNotice};

/// Kind of a [`ThreepidError`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Network,
    WrongCode,
    Server,
}

/// Errors from requesting a verification code or submitting a token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThreepidError {
    /// Malformed phone number or country
    #[error("Invalid phone number: {message}")]
    Validation { message: String },

    /// Transient transport failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// Token rejected by the server for authentication reasons
    #[error("Wrong verification code: {message}")]
    WrongCode { message: String },

    /// Any other server-reported failure
    #[error("Server error: {message}")]
    Server {
        errcode: Option<String>,
        message: String,
    },
}

impl ThreepidError {
    /// Classify a server error response by its Matrix `errcode`
    pub fn from_server(errcode: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        match errcode {
            Some(error_codes::M_THREEPID_AUTH_FAILED) => ThreepidError::WrongCode { message },
            _ => ThreepidError::Server {
                errcode: errcode.map(str::to_string),
                message,
            },
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ThreepidError::Validation {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ThreepidError::Network {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ThreepidError::Validation { .. } => ErrorKind::Validation,
            ThreepidError::Network { .. } => ErrorKind::Network,
            ThreepidError::WrongCode { .. } => ErrorKind::WrongCode,
            ThreepidError::Server { .. } => ErrorKind::Server,
        }
    }

    /// The raw message as reported by the client or server
    pub fn message(&self) -> &str {
        match self {
            ThreepidError::Validation { message }
            | ThreepidError::Network { message }
            | ThreepidError::WrongCode { message }
            | ThreepidError::Server { message, .. } => message,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ThreepidError::Validation { .. } => error_codes::VALIDATION_ERROR,
            ThreepidError::Network { .. } => error_codes::NETWORK_ERROR,
            ThreepidError::WrongCode { .. } => error_codes::VERIFICATION_CODE_INVALID,
            ThreepidError::Server { .. } => error_codes::SERVER_ERROR,
        }
    }
}

impl IntoErrorNotice for ThreepidError {
    fn to_error_notice(&self, title: &str) -> ErrorNotice {
        let notice = ErrorNotice::new(self.code(), title, self.message());
        match self {
            ThreepidError::Server {
                errcode: Some(errcode),
                ..
            } => notice.add_detail("errcode", errcode),
            ThreepidError::WrongCode { .. } => {
                notice.add_detail("errcode", error_codes::M_THREEPID_AUTH_FAILED)
            }
            _ => notice,
        }
    }
}
