//! Phone number form input: the selected country and the typed number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use threepid_shared::utils::phone::is_valid_country_code;
use threepid_shared::utils::validation::{validators, Validate, ValidationErrors};

use crate::errors::ThreepidError;

/// ISO 3166-1 alpha-2 country code selected in the country dropdown
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse a country code, accepting surrounding whitespace and lowercase
    pub fn parse(code: &str) -> Result<Self, ThreepidError> {
        let code = code.trim().to_ascii_uppercase();
        if is_valid_country_code(&code) {
            Ok(Self(code))
        } else {
            Err(ThreepidError::validation(format!(
                "Unknown country code: {}",
                code
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = ThreepidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = ThreepidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contents of the add-phone-number form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneInput {
    /// Selected country, `None` until the user picks one
    pub country: Option<CountryCode>,
    /// Free-text phone number as typed
    pub number: String,
}

impl PhoneInput {
    pub fn new(country: Option<CountryCode>, number: impl Into<String>) -> Self {
        Self {
            country,
            number: number.into(),
        }
    }

    /// The number without surrounding whitespace
    pub fn trimmed_number(&self) -> &str {
        self.number.trim()
    }

    /// Reset the typed number, keeping the selected country
    pub fn clear_number(&mut self) {
        self.number.clear();
    }
}

impl Validate for PhoneInput {
    /// Only emptiness is checked here; the identity server validates the format.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !validators::not_empty(&self.number) {
            errors.add_error("phone_number", "Phone number is required", "required");
        }
        errors.into_result()
    }
}
