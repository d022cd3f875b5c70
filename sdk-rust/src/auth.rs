//! Account endpoints: login, registration, OTP verification and profile
//! maintenance. Each call updates the shared [`Session`] where the web
//! client would update local storage.

use crate::{ApiEnvelope, ClientError, ClientResult, Session, User};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

const MIN_PASSWORD_LEN: usize = 8;
const OTP_LEN: usize = 6;
/// Login failures mentioning this are accounts awaiting email verification.
const OTP_PENDING_MARKER: &str = "verifikasi OTP";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> ClientResult<()> {
        if self.email.trim().is_empty() {
            return Err(ClientError::InvalidInput("Email wajib diisi".to_string()));
        }
        validate_new_password(&self.password, &self.password_confirmation, "Password")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> ClientResult<()> {
        validate_new_password(
            &self.new_password,
            &self.new_password_confirmation,
            "Password baru",
        )
    }
}

fn validate_new_password(password: &str, confirmation: &str, subject: &str) -> ClientResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::InvalidInput(format!(
            "{subject} minimal {MIN_PASSWORD_LEN} karakter"
        )));
    }
    if password != confirmation {
        return Err(ClientError::InvalidInput(
            "Konfirmasi password tidak cocok".to_string(),
        ));
    }
    Ok(())
}

pub struct Auth {
    session: Arc<Session>,
}

impl Auth {
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Sign in and load the credit balance before returning.
    ///
    /// An unverified account yields [`ClientError::OtpRequired`] after a new
    /// code has been requested for `email`.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let result = self
            .post("/login", json!({ "email": email, "password": password }))
            .await;

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(error) => {
                let message = error.server_message().map(ToString::to_string);
                if let Some(message) = message.filter(|m| m.contains(OTP_PENDING_MARKER)) {
                    if let Err(error) = self.resend_otp(email).await {
                        tracing::warn!(%error, "failed to resend OTP after login");
                    }
                    return Err(ClientError::OtpRequired(message));
                }
                return Err(error);
            }
        };

        let token = required_str(&envelope.data, "token")?;
        let user: User = serde_json::from_value(envelope.data["user"].clone())?;

        self.session.sign_in(&token, user.clone())?;
        self.session.refresh_user_limit().await;
        tracing::info!(user = %user.name, "signed in");
        Ok(user)
    }

    /// Create an account. The service emails an OTP to confirm it.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<Option<String>> {
        request.validate()?;
        let envelope = self.post("/register", serde_json::to_value(request)?).await?;
        Ok(envelope.message)
    }

    /// Confirm `email` with the emailed code and store the returned token.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> ClientResult<()> {
        let otp = otp.trim();
        if otp.len() != OTP_LEN || !otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(ClientError::InvalidInput(
                "Mohon masukkan 6 digit OTP".to_string(),
            ));
        }
        if email.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Email tidak ditemukan. Silakan login ulang.".to_string(),
            ));
        }

        let envelope = self
            .post("/verify-otp", json!({ "email": email, "otp": otp }))
            .await?;
        let token = required_str(&envelope.data, "token")?;
        self.session.store_token(&token)
    }

    pub async fn resend_otp(&self, email: &str) -> ClientResult<()> {
        self.post("/resend-otp", json!({ "email": email })).await?;
        tracing::debug!("OTP resent");
        Ok(())
    }

    /// Save profile fields and replace the session user with the one the
    /// service returns.
    pub async fn update_profile(&self, profile: Value) -> ClientResult<User> {
        let envelope = self.post("/profile", profile).await?;
        let user: User = serde_json::from_value(envelope.data["user"].clone())?;
        self.session.set_user(Some(user.clone()))?;
        Ok(user)
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ClientResult<Option<String>> {
        request.validate()?;
        let envelope = self
            .post("/change-password", serde_json::to_value(request)?)
            .await?;
        Ok(envelope.message)
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.session.sign_out()
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<ApiEnvelope> {
        self.session.api().post(path, body).await?.into_success()
    }
}

fn required_str(data: &Value, key: &str) -> ClientResult<String> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ClientError::Invariant(format!("Response has no {key}")))
}
