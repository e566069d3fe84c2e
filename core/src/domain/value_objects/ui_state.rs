//! Observable UI states for hosts, tests and automation.

use serde::{Deserialize, Serialize};

use crate::domain::entities::CountryCode;

/// Coarse state of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UiState {
    /// Nothing in flight, the form can be used
    Idle,
    /// A request or submission is in flight; show a spinner
    Busy,
    /// Waiting for the user to enter the code
    AwaitingCode,
}

/// What the host should render in place of the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Spinner,
    Form {
        country: Option<CountryCode>,
        number: String,
    },
    /// Guests cannot add phone numbers
    Hidden,
}
