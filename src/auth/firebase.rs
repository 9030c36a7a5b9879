//! Firebase Authentication over its REST API.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AuthError, Credentials, IdentityProvider, Session, User};

pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug)]
pub struct FirebaseProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    current: Mutex<Option<User>>,
}

impl FirebaseProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_owned())
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            current: Mutex::new(None),
        }
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, AuthError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/accounts:{method}", self.endpoint);
        debug!(%url, "calling identity toolkit");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|err| AuthError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|err| AuthError::Provider(format!("malformed response: {err}")));
        }

        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => Err(map_error_code(&envelope.error.message)),
            Err(_) => Err(AuthError::Provider(format!("HTTP {status}"))),
        }
    }

    async fn password_call(&self, method: &str, credentials: &Credentials) -> Result<Session, AuthError> {
        let request = PasswordRequest {
            email: &credentials.email,
            password: &credentials.password,
            return_secure_token: true,
        };
        let account: AccountResponse = self.call(method, &request).await?;

        let user = User {
            uid: account.local_id,
            email: account.email,
            email_verified: false,
            id_token: Some(account.id_token),
        };
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(Session::signed_in(user))
    }
}

/// Maps an identity toolkit error message such as
/// `"WEAK_PASSWORD : Password should be at least 6 characters"` to an
/// [`AuthError`].
pub fn map_error_code(message: &str) -> AuthError {
    let code = message.split(':').next().unwrap_or(message).trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "MISSING_PASSWORD"
        | "USER_DISABLED" => AuthError::InvalidCredentials,
        "EMAIL_EXISTS" => AuthError::EmailExists,
        "WEAK_PASSWORD" => AuthError::WeakPassword,
        "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
        "INVALID_ID_TOKEN" | "USER_NOT_FOUND" | "TOKEN_EXPIRED" => AuthError::NotSignedIn,
        _ => AuthError::Provider(message.to_owned()),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.password_call("signInWithPassword", credentials).await?;
        info!(email = %credentials.email, "signed in");
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.password_call("signUp", credentials).await?;
        info!(email = %credentials.email, "account created");
        Ok(session)
    }

    async fn send_verification_email(&self, session: &Session) -> Result<(), AuthError> {
        let id_token = session
            .user()
            .and_then(|user| user.id_token.as_deref())
            .ok_or(AuthError::NotSignedIn)?;

        let request = OobCodeRequest {
            request_type: "VERIFY_EMAIL",
            id_token,
        };
        let _: serde_json::Value = self.call("sendOobCode", &request).await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }

    fn current_session(&self) -> Session {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some(user) => Session::signed_in(user.clone()),
            None => Session::anonymous(),
        }
    }
}
