use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{is_plausible_email, AuthError, Credentials, IdentityProvider, Session, User};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
    verified: bool,
}

/// In-process identity provider.
///
/// Accounts live in memory for the lifetime of the process. Passwords are
/// compared as given.
#[derive(Debug, Default)]
pub struct LocalProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<User>>,
    verifications: Mutex<Vec<String>>,
    latency: Duration,
    fail_verification: AtomicBool,
    calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl LocalProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every async call, to mimic a remote provider.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Seeds a verified account.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        lock(&self.accounts).insert(
            email.to_owned(),
            Account {
                uid: Uuid::new_v4().to_string(),
                password: password.to_owned(),
                verified: true,
            },
        );
        self
    }

    /// Makes every following verification email dispatch fail.
    pub fn set_fail_verification(&self, fail: bool) {
        self.fail_verification.store(fail, Ordering::SeqCst);
    }

    /// Addresses a verification email was sent to, oldest first.
    pub fn verifications_sent(&self) -> Vec<String> {
        lock(&self.verifications).clone()
    }

    /// Number of async provider calls issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn begin_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn sign_in_as(&self, email: &str, account: &Account) -> Session {
        let user = User {
            uid: account.uid.clone(),
            email: email.to_owned(),
            email_verified: account.verified,
            id_token: Some(Uuid::new_v4().to_string()),
        };
        *lock(&self.current) = Some(user.clone());
        Session::signed_in(user)
    }
}

#[async_trait]
impl IdentityProvider for LocalProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.begin_call().await;

        if !is_plausible_email(&credentials.email) {
            return Err(AuthError::InvalidEmail);
        }

        let account = lock(&self.accounts).get(&credentials.email).cloned();
        match account {
            Some(account) if account.password == credentials.password => {
                debug!(email = %credentials.email, "local sign-in accepted");
                Ok(self.sign_in_as(&credentials.email, &account))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.begin_call().await;

        if !is_plausible_email(&credentials.email) {
            return Err(AuthError::InvalidEmail);
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let account = {
            let mut accounts = lock(&self.accounts);
            if accounts.contains_key(&credentials.email) {
                return Err(AuthError::EmailExists);
            }
            let account = Account {
                uid: Uuid::new_v4().to_string(),
                password: credentials.password.clone(),
                verified: false,
            };
            accounts.insert(credentials.email.clone(), account.clone());
            account
        };

        debug!(email = %credentials.email, "local account created");
        Ok(self.sign_in_as(&credentials.email, &account))
    }

    async fn send_verification_email(&self, session: &Session) -> Result<(), AuthError> {
        self.begin_call().await;

        let user = session.user().ok_or(AuthError::NotSignedIn)?;
        if self.fail_verification.load(Ordering::SeqCst) {
            return Err(AuthError::Provider("verification email could not be sent".into()));
        }

        lock(&self.verifications).push(user.email.clone());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.begin_call().await;

        lock(&self.current).take();
        Ok(())
    }

    fn current_session(&self) -> Session {
        match lock(&self.current).clone() {
            Some(user) => Session::signed_in(user),
            None => Session::anonymous(),
        }
    }
}
