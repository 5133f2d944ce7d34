//! Client-side form validation.
//!
//! Runs before any network call; a non-empty [`FieldErrors`] means the
//! submit is rejected locally and nothing is sent. Messages are the ones
//! the forms render inline under each field.

use std::sync::OnceLock;

use regex::Regex;

use super::FormField;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_LEN: usize = 8;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid static regex"))
}

/// Validation failures keyed by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<(FormField, String)>,
}

impl FieldErrors {
    fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.entries.push((field, message.into()));
    }

    /// First error message for `field`, if any.
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !email_regex().is_match(email) {
        errors.push(FormField::Email, "Invalid email address");
    }
}

fn check_password(errors: &mut FieldErrors, field: FormField, password: &str, label: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(
            field,
            format!("{label} should be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
}

/// Login: email format and password length.
pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, email);
    check_password(&mut errors, FormField::Password, password, "Password");
    errors
}

/// Signup: non-empty names, email format, both passwords long enough, and —
/// only once both pass the length check — equality of the two passwords.
pub fn validate_signup(
    firstname: &str,
    lastname: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if firstname.trim().is_empty() {
        errors.push(FormField::Firstname, "First name is required");
    }
    if lastname.trim().is_empty() {
        errors.push(FormField::Lastname, "Last name is required");
    }
    check_email(&mut errors, email);
    check_password(&mut errors, FormField::Password, password, "Password");
    let confirm_len_ok = confirm_password.chars().count() >= MIN_PASSWORD_LEN;
    if !confirm_len_ok {
        check_password(
            &mut errors,
            FormField::ConfirmPassword,
            confirm_password,
            "Confirm password",
        );
    } else if password != confirm_password {
        errors.push(FormField::ConfirmPassword, "Passwords don't match");
    }
    errors
}
