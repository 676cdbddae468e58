//! Shape checks for form fields

use crate::error::UiError;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap());

/// Separators ignored in phone numbers
static PHONE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\-()]").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned = PHONE_SEPARATORS.replace_all(phone, "");
    PHONE_REGEX.is_match(&cleaned)
}

/// Check a single field value
///
/// `input_type` is the control's `type` attribute. Empty optional fields
/// always pass; type checks only apply to non-empty values.
pub fn check_field(
    name: &str,
    input_type: Option<&str>,
    required: bool,
    value: &str,
) -> Result<(), UiError> {
    let value = value.trim();
    let failure = |reason: &str| UiError::ValidationFailure {
        field: name.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return if required {
            Err(failure("required"))
        } else {
            Ok(())
        };
    }

    match input_type {
        Some("email") if !is_valid_email(value) => Err(failure("malformed email")),
        Some("tel") if !is_valid_phone(value) => Err(failure("malformed phone number")),
        _ => Ok(()),
    }
}
