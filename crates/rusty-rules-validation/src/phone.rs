//! Phone number validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// E.164: leading '+', then 7 to 15 digits
static E164_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]?[0-9]{7,14}$").expect("valid E.164 pattern"));

// North American dashed form: 403-111-5555
static NANP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[2-9]\d{2}-\d{3}-\d{4}$").expect("valid NANP pattern"));

/// Validates an E.164 phone number such as `+16175551212`
pub fn is_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Validates a dashed North American phone number such as `403-111-5555`
pub fn is_nanp_phone(phone: &str) -> bool {
    NANP_REGEX.is_match(phone)
}
