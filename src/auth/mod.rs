//! Login and signup form state.
//!
//! Each form owns its input buffers, focus, inline errors, and the
//! in-flight flag that debounces double submits. Validation happens here,
//! before anything reaches the network; the event loop only submits a form
//! whose [`validate`](LoginForm::validate) returned `true`.

pub mod validate;
pub mod view;

use crate::api::models::{LoginRequest, SignupRequest};
use validate::FieldErrors;

/// Every field across both forms. The per-form tab order is a slice of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Firstname,
    Lastname,
    Email,
    Password,
    ConfirmPassword,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Firstname => "First Name",
            Self::Lastname => "Last Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
        }
    }

    /// Password fields render masked.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: usize,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl LoginForm {
    pub const FIELDS: [FormField; 2] = [FormField::Email, FormField::Password];

    pub fn focused(&self) -> FormField {
        Self::FIELDS[self.focus % Self::FIELDS.len()]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Self::FIELDS.len() - 1) % Self::FIELDS.len();
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.email,
            _ => &self.password,
        }
    }

    pub fn insert(&mut self, c: char) {
        match self.focused() {
            FormField::Email => self.email.push(c),
            _ => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focused() {
            FormField::Email => self.email.pop(),
            _ => self.password.pop(),
        };
    }

    /// Run client-side validation; record inline errors and report whether
    /// the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = validate::validate_login(&self.email, &self.password);
        self.errors.is_empty()
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SignupForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub focus: usize,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl SignupForm {
    pub const FIELDS: [FormField; 5] = [
        FormField::Firstname,
        FormField::Lastname,
        FormField::Email,
        FormField::Password,
        FormField::ConfirmPassword,
    ];

    pub fn focused(&self) -> FormField {
        Self::FIELDS[self.focus % Self::FIELDS.len()]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Self::FIELDS.len() - 1) % Self::FIELDS.len();
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Firstname => &self.firstname,
            FormField::Lastname => &self.lastname,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Firstname => &mut self.firstname,
            FormField::Lastname => &mut self.lastname,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn insert(&mut self, c: char) {
        let field = self.focused();
        self.value_mut(field).push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        self.value_mut(field).pop();
    }

    pub fn validate(&mut self) -> bool {
        self.errors = validate::validate_signup(
            &self.firstname,
            &self.lastname,
            &self.email,
            &self.password,
            &self.confirm_password,
        );
        self.errors.is_empty()
    }

    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}
