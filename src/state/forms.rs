use thiserror::Error;

use crate::auth::{AuthError, Credentials};

/// Inline error shown under a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error(transparent)]
    Auth(AuthError),
}

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<FormError>,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<FormError>,
}

impl RegistrationForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}
