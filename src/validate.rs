use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ApiError, ApiResult, FieldErrors};

/// Collects every rule violation before failing, so clients get the
/// complete field -> messages map in one round trip.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// A phone number is 8 to 14 digit characters interspersed with
/// separators, 10 to 30 characters in total.
pub fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_CHARS_RE: Regex = Regex::new(r"^[-\d()+ ]+$").unwrap();
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    PHONE_CHARS_RE.is_match(phone) && (8..=14).contains(&digits)
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns true when the value is present, so callers can skip the
    /// remaining rules for an absent field.
    pub fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("The {field} field is required."));
            return false;
        }
        true
    }

    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            self.add(
                field,
                format!("The {field} must be between {min} and {max} characters."),
            );
        }
    }

    pub fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                field,
                format!("The {field} may not be greater than {max} characters."),
            );
        }
    }

    pub fn min_length(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(
                field,
                format!("The {field} must be at least {min} characters."),
            );
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !is_valid_email(value) {
            self.add(field, format!("The {field} must be a valid email address."));
        }
        self.max_length(field, value, 255);
    }

    pub fn phone(&mut self, field: &str, value: &str) {
        if !is_valid_phone(value) {
            self.add(field, format!("The {field} format is invalid."));
        }
        self.length(field, value, 10, 30);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn finish(self) -> ApiResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}
