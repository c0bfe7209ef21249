//! Field-level validation shared by the write services.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_TEXT_LEN: usize = 5000;

/// Error messages keyed by the input field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
            .expect("Invalid regex")
    })
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && email_regex().is_match(email)
}

/// Trims `value`, records an error when it is blank or longer than
/// `max_len` characters, and returns the trimmed text.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> String {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.add(field, "This field is required.");
    } else if trimmed.chars().count() > max_len {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        );
    }
    trimmed.to_string()
}

/// Parses a required integer reference. Records an error and returns `None`
/// when it is missing or not a positive integer.
pub fn required_id(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<i32> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, "This field is required.");
            None
        }
        Some(raw) => parse_id(errors, field, raw),
    }
}

/// Like [`required_id`], but a missing or blank value is simply `None`.
pub fn optional_id(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<i32> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(raw) => parse_id(errors, field, raw),
    }
}

fn parse_id(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<i32> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "A valid integer is required.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("test@gmail.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(&format!("{}@example.com", "a".repeat(250))));
    }

    #[test]
    fn test_required_text() {
        let mut errors = FieldErrors::new();
        assert_eq!(required_text(&mut errors, "name", Some("  Ann "), 10), "Ann");
        assert!(errors.is_empty());

        required_text(&mut errors, "name", Some("   "), 10);
        required_text(&mut errors, "text", None, 10);
        required_text(&mut errors, "email", Some("abcdefghijk"), 10);
        assert!(errors.contains("name"));
        assert!(errors.contains("text"));
        assert!(errors.contains("email"));
    }

    #[test]
    fn test_id_parsing() {
        let mut errors = FieldErrors::new();
        assert_eq!(required_id(&mut errors, "movie", Some("12")), Some(12));
        assert_eq!(optional_id(&mut errors, "parent", Some("")), None);
        assert_eq!(optional_id(&mut errors, "parent", None), None);
        assert!(errors.is_empty());

        assert_eq!(required_id(&mut errors, "movie", None), None);
        assert_eq!(optional_id(&mut errors, "parent", Some("abc")), None);
        assert_eq!(required_id(&mut errors, "star", Some("-1")), None);
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["movie", "parent", "star"]);
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::single("email", "Enter a valid email address.");
        errors.add("movie", "Movie 9 does not exist.");
        assert_eq!(
            errors.to_string(),
            "email: Enter a valid email address.; movie: Movie 9 does not exist."
        );
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
