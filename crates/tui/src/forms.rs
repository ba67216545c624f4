//! Auth form state and client-side validation.
//!
//! Validation only runs on submit. When any field fails, no request is sent
//! and each failing field shows its message inline.

use std::sync::LazyLock;

use api_types::auth::{Credentials, UserNew};
use regex::Regex;

/// `local@label(.label)*`, the WHATWG rule for `type=email` inputs.
static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .ok()
});

static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

/// First failing rule per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(Field, &'static str)>);

impl FieldErrors {
    fn check(&mut self, field: Field, rules: &[(bool, &'static str)]) {
        if let Some((_, message)) = rules.iter().find(|(failed, _)| *failed) {
            self.0.push((field, *message));
        }
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| *message)
    }

    pub fn clear(&mut self, field: Field) {
        self.0.retain(|(f, _)| *f != field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub trait Form: Default {
    /// Fields in focus order.
    const FIELDS: &'static [Field];

    fn value(&self, field: Field) -> &str;
    fn value_mut(&mut self, field: Field) -> Option<&mut String>;
    fn validate(&self) -> FieldErrors;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl Form for LoginForm {
    const FIELDS: &'static [Field] = &[Field::Email, Field::Password];

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            _ => None,
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        errors.check(
            Field::Password,
            &[(self.password.is_empty(), "Password is required")],
        );
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn user(&self) -> UserNew {
        UserNew {
            email: self.email.clone(),
            phone: self.phone.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            password: self.password.clone(),
        }
    }
}

impl Form for RegisterForm {
    const FIELDS: &'static [Field] = &[
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Password,
        Field::ConfirmPassword,
    ];

    fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        })
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        errors.check(
            Field::FirstName,
            &[(self.first_name.is_empty(), "First name is required")],
        );
        errors.check(
            Field::LastName,
            &[(self.last_name.is_empty(), "Last name is required")],
        );
        check_email(&mut errors, &self.email);
        errors.check(
            Field::Phone,
            &[
                (self.phone.is_empty(), "Phone number is required"),
                (!is_valid_phone(&self.phone), "Please enter a valid phone number"),
            ],
        );
        errors.check(
            Field::Password,
            &[
                (self.password.is_empty(), "Password is required"),
                (
                    self.password.chars().count() < 8,
                    "Password must be at least 8 characters",
                ),
            ],
        );
        errors.check(
            Field::ConfirmPassword,
            &[
                (
                    self.confirm_password.is_empty(),
                    "Confirm password is required",
                ),
                (self.confirm_password != self.password, "Passwords must match"),
            ],
        );
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl Form for ForgotPasswordForm {
    const FIELDS: &'static [Field] = &[Field::Email];

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            _ => None,
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        errors
    }
}

/// Editing state shared by all auth screens.
#[derive(Debug, Clone, Default)]
pub struct FormState<F: Form> {
    pub form: F,
    pub focus: usize,
    pub errors: FieldErrors,
    /// Shows password fields in clear text.
    pub reveal_secrets: bool,
}

impl<F: Form> FormState<F> {
    pub fn focused(&self) -> Field {
        F::FIELDS[self.focus.min(F::FIELDS.len() - 1)]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % F::FIELDS.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + F::FIELDS.len() - 1) % F::FIELDS.len();
    }

    pub fn push(&mut self, ch: char) {
        let field = self.focused();
        if let Some(value) = self.form.value_mut(field) {
            value.push(ch);
        }
        self.errors.clear(field);
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(value) = self.form.value_mut(field) {
            value.pop();
        }
        self.errors.clear(field);
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal_secrets = !self.reveal_secrets;
    }

    /// Validates every field; returns `true` when the form may be sent.
    pub fn check(&mut self) -> bool {
        self.errors = self.form.validate();
        self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    errors.check(
        Field::Email,
        &[
            (email.is_empty(), "Email is required"),
            (!is_valid_email(email), "Enter a valid email"),
        ],
    );
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// 10 to 15 ASCII digits, nothing else.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.as_ref().is_some_and(|re| re.is_match(phone))
}
