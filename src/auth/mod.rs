//! Identity provider seam.
//!
//! Authentication is delegated entirely to an external provider. The rest of
//! the application only sees [`Session`] values returned from provider calls
//! and never reaches into provider state on its own.

pub mod firebase;
pub mod local;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ConfigError, ProviderConfig, ProviderKind};

pub use firebase::FirebaseProvider;
pub use local::LocalProvider;

/// A signed-in account as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
    pub id_token: Option<String>,
}

/// Provider-held proof of authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account already exists for this email")]
    EmailExists,
    #[error("password is too weak")]
    WeakPassword,
    #[error("email address is malformed")]
    InvalidEmail,
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("network error: {0}")]
    Network(String),
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Operations the application needs from an identity provider.
///
/// Calls are never cancelled and carry no timeout.
#[async_trait]
pub trait IdentityProvider: fmt::Debug + Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    async fn send_verification_email(&self, session: &Session) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Session held by the provider right now, read synchronously.
    fn current_session(&self) -> Session;
}

/// Builds the provider selected in the configuration.
pub fn connect(config: &ProviderConfig) -> Result<Arc<dyn IdentityProvider>, ConfigError> {
    match config.kind {
        ProviderKind::Local => Ok(Arc::new(
            LocalProvider::new().with_latency(Duration::from_millis(config.latency_ms)),
        )),
        ProviderKind::Firebase => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or(ConfigError::MissingApiKey)?;
            let provider = match &config.endpoint {
                Some(endpoint) => FirebaseProvider::with_endpoint(api_key, endpoint.clone()),
                None => FirebaseProvider::new(api_key),
            };
            Ok(Arc::new(provider))
        }
    }
}

pub(crate) fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
