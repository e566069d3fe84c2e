//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// ISO 3166-1 alpha-2 country code
static COUNTRY_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a country code is a well-formed ISO 3166-1 alpha-2 code
pub fn is_valid_country_code(code: &str) -> bool {
    COUNTRY_CODE_REGEX.is_match(code)
}

/// Format an MSISDN for display, e.g. `15551234` -> `+15551234`
pub fn format_msisdn(msisdn: &str) -> String {
    format!("+{}", msisdn.trim_start_matches('+'))
}

/// Mask a phone number for logs and display (e.g., 155****1234)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
