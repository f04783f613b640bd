//! Contact form and lead request validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Deliberately loose address check: something, `@`, something, `.`, something.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Maximum accepted length of a free-text summary or message.
pub const MAX_MESSAGE_LEN: usize = 5_000;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate and trim an email address.
pub fn validate_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !is_valid_email(email) {
        return Err(CoreError::Validation(format!("Invalid email address '{email}'")));
    }
    Ok(email.to_string())
}

/// Validate optional free text, returning it trimmed (or `None` if blank).
pub fn validate_message(text: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "Message is too long (max {MAX_MESSAGE_LEN} characters)"
        )));
    }
    Ok(Some(text.to_string()))
}
