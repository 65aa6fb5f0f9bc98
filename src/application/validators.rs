use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld`: exactly one "@", a "." somewhere after it, no whitespace.
#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex should not panic"));

/// Validates that the input looks like an email address.
///
/// No trimming happens here; surrounding whitespace makes the address invalid.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Returns true when no field is the empty string.
pub fn all_non_empty(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.is_empty())
}

/// Returns true if any field contains a control character (NUL included).
pub fn any_control_chars(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.chars().any(char::is_control))
}
