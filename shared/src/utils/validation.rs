//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

static ZIP_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{3}$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}$").unwrap());

/// Minimum password length accepted at registration and password change
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding a single error
    pub fn single(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_error(field, message, code);
        errors
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(FieldError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any error is attached to `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Common validation functions
pub mod validators {
    use super::{EMAIL_REGEX, MIN_PASSWORD_LENGTH, PHONE_REGEX, ZIP_CODE_REGEX};

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if an email address is valid
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }

    /// At least six characters with a lowercase letter, an uppercase letter,
    /// a digit and a character outside `[A-Za-z0-9_]`.
    pub fn is_strong_password(password: &str) -> bool {
        password.chars().count() >= MIN_PASSWORD_LENGTH
            && password.chars().any(|c| c.is_lowercase())
            && password.chars().any(|c| c.is_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| !(c.is_alphanumeric() || c == '_'))
    }

    /// Polish postal code, e.g. `00-950`
    pub fn is_valid_zip_code(zip_code: &str) -> bool {
        ZIP_CODE_REGEX.is_match(zip_code)
    }

    /// Nine-digit phone number without country prefix
    pub fn is_valid_phone_number(phone: &str) -> bool {
        PHONE_REGEX.is_match(phone)
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.pl"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user.example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_strength() {
        assert!(is_strong_password("Admin123!"));
        assert!(is_strong_password("aB3$ef"));
        assert!(!is_strong_password("aB3$e"));
        assert!(!is_strong_password("admin123!"));
        assert!(!is_strong_password("ADMIN123!"));
        assert!(!is_strong_password("Admin!!!"));
        assert!(!is_strong_password("Admin123"));
        assert!(!is_strong_password("Admin_123"));
    }

    #[test]
    fn test_zip_code_and_phone() {
        assert!(is_valid_zip_code("00-950"));
        assert!(!is_valid_zip_code("00950"));
        assert!(!is_valid_zip_code("0-9500"));
        assert!(is_valid_phone_number("123456789"));
        assert!(!is_valid_phone_number("12345678"));
        assert!(!is_valid_phone_number("+48123456789"));
    }

    #[test]
    fn test_validation_errors_grouping() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add_error("email", "taken", "email_taken");
        errors.add_error("email", "invalid", "email_invalid");
        errors.add_error("password", "weak", "password_weak");

        assert!(errors.has_field("email"));
        assert!(!errors.has_field("phone"));
        let grouped = errors.to_field_errors();
        assert_eq!(grouped["email"].len(), 2);
        assert_eq!(errors.to_string(), "invalid fields: email, email, password");
        assert!(errors.into_result().is_err());
    }
}
