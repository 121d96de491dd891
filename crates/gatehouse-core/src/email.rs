//! Email field state and address validation

use std::sync::OnceLock;

use regex::Regex;

/// Address grammar: one `@`, no whitespace, dotted domain.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Check whether a string is a well-formed email address.
///
/// Leading and trailing whitespace is not forgiven here; callers that accept
/// padded input should validate the trimmed value.
pub fn is_valid_address(address: &str) -> bool {
    email_regex().is_match(address)
}

/// The email input field.
///
/// Holds the raw keystroke buffer; the trimmed value and validity are
/// derived on every read so enablement of the submit affordance always
/// reflects the current buffer.
#[derive(Clone, Debug, Default)]
pub struct EmailField {
    raw: String,
}

impl EmailField {
    /// Create an empty field
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw buffer as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The buffer with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }

    /// Whether the trimmed value is a well-formed, non-empty address
    pub fn is_valid(&self) -> bool {
        let trimmed = self.trimmed();
        !trimmed.is_empty() && is_valid_address(trimmed)
    }

    /// Append a character
    pub fn push(&mut self, ch: char) {
        self.raw.push(ch);
    }

    /// Remove the last character
    pub fn pop(&mut self) {
        self.raw.pop();
    }

    /// Replace the buffer wholesale
    pub fn set(&mut self, value: impl Into<String>) {
        self.raw = value.into();
    }

    /// Whether the raw buffer is empty
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
