//! Login form validation.
//!
//! Validation runs before any request is issued: a form that fails here never
//! reaches the gateway.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Email,
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginField::Name => write!(f, "name"),
            LoginField::Email => write!(f, "email"),
        }
    }
}

/// A field-level validation message, shown next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: LoginField,
    pub message: &'static str,
}

/// Raw login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
}

/// Validated credentials, serialized as the `POST /auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub name: String,
    pub email: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Checks both fields and returns every failure at once.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per invalid field.
    pub fn validate(&self) -> Result<Credentials, Vec<FieldError>> {
        let name = self.name.trim();
        let email = self.email.trim();
        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push(FieldError {
                field: LoginField::Name,
                message: "Name is required",
            });
        }

        if email.is_empty() {
            errors.push(FieldError {
                field: LoginField::Email,
                message: "Email is required",
            });
        } else if !EMAIL_RE.is_match(email) {
            errors.push(FieldError {
                field: LoginField::Email,
                message: "Invalid email",
            });
        }

        if errors.is_empty() {
            Ok(Credentials {
                name: name.to_owned(),
                email: email.to_owned(),
            })
        } else {
            Err(errors)
        }
    }
}
