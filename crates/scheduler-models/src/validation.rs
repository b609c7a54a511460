//! Validation errors for incoming entity data.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field as it appears on the wire.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: &'static str,
}

impl ValidationError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    /// The field is missing or empty.
    pub const fn required(field: &'static str) -> Self {
        Self::new(field, "this field is required")
    }
}

/// `local@host.tld`: no whitespace, exactly one `@`, a dotted domain with
/// no empty labels.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid email pattern"))
}

/// Structural email check.
pub(crate) fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}
