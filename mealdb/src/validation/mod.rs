//! Input normalization and format rules for the registration workflow.
//! Every rule is checked before any write happens, so a failure never leaves
//! partial state behind.

use crate::error::{MealDbError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Registration input after normalization: trimmed name, lowercased email,
/// phone with all whitespace stripped.
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

pub fn normalize(full_name: &str, email: &str, phone: &str) -> RegistrationInput {
    RegistrationInput {
        full_name: full_name.trim().to_string(),
        email: email.trim().to_lowercase(),
        phone: normalize_phone(phone),
    }
}

/// Strip all whitespace. Also used when comparing stored phones for the
/// duplicate check, so both sides are in the same form.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check the normalized input against the format rules. The error names the
/// first failing field so the caller can surface it.
pub fn validate(input: &RegistrationInput, password: &str) -> Result<()> {
    if input.full_name.is_empty() {
        return Err(MealDbError::validation("fullName", "name must not be empty"));
    }
    if !email_re().is_match(&input.email) {
        return Err(MealDbError::validation(
            "email",
            format!("'{}' is not a valid email address", input.email),
        ));
    }
    if !phone_re().is_match(&input.phone) {
        return Err(MealDbError::validation(
            "phone",
            "phone must be 9-15 digits with an optional leading +",
        ));
    }
    if password.len() < 6 {
        return Err(MealDbError::validation(
            "password",
            "password must be at least 6 characters",
        ));
    }
    Ok(())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?\d{9,15}$").expect("phone pattern"))
}
