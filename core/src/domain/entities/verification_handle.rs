//! Server-side verification transaction handle.

use std::fmt;

/// One in-progress verification transaction on the identity server
///
/// Produced by the identity client when a code is requested and handed back
/// on every token submission. The same handle may be submitted repeatedly
/// after a wrong code; a wrong attempt does not invalidate it.
///
/// Handles compare by value. The session relies on this to recognize
/// responses that belong to a handle it has already discarded.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VerificationHandle {
    sid: String,
    client_secret: String,
}

impl VerificationHandle {
    pub fn new(sid: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Server-assigned session id
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// Client-generated secret bound to the session
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for VerificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationHandle")
            .field("sid", &self.sid)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Successful response to a verification code request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedVerification {
    /// Handle for submitting the code
    pub handle: VerificationHandle,
    /// Phone number in international format, as echoed back by the server
    pub msisdn: String,
}

impl RequestedVerification {
    pub fn new(handle: VerificationHandle, msisdn: impl Into<String>) -> Self {
        Self {
            handle,
            msisdn: msisdn.into(),
        }
    }
}
