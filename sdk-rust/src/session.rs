use crate::{
    client_utils::value_to_i64,
    storage::{TOKEN_KEY, USER_KEY},
    BrainysApi, ClientError, ClientResult, CreditBalance, SessionStorage, User, NO_ACTIVE_PACKAGE,
};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::task::JoinHandle;
use tracing_futures::Instrument;

pub const USER_PROFILE_PATH: &str = "/user-profile";

/// The signed-in user and their credit balance.
///
/// One instance is shared by every form, renderer and exporter of the
/// client. It is restored from [`SessionStorage`] on start, refreshed after
/// every credit-consuming action and cleared on sign-out.
pub struct Session {
    api: Arc<dyn BrainysApi>,
    storage: Arc<dyn SessionStorage>,
    user: RwLock<Option<User>>,
    balance: RwLock<CreditBalance>,
}

impl Session {
    #[must_use]
    pub fn new(api: Arc<dyn BrainysApi>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            user: RwLock::new(None),
            balance: RwLock::new(CreditBalance::default()),
        }
    }

    /// Create a session with the user persisted in `storage`, if any.
    /// A malformed persisted user is ignored.
    ///
    /// When a user is restored inside a Tokio runtime, their credit balance
    /// is loaded on a detached refresh.
    #[must_use]
    pub fn restore(api: Arc<dyn BrainysApi>, storage: Arc<dyn SessionStorage>) -> Arc<Self> {
        let user = storage
            .get(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(error) => {
                    tracing::warn!(%error, "ignoring malformed persisted user");
                    None
                }
            });

        let restored = user.is_some();
        let session = Self::new(api, storage);
        *session.user.write().unwrap_or_else(PoisonError::into_inner) = user;
        let session = Arc::new(session);

        if restored {
            if tokio::runtime::Handle::try_current().is_ok() {
                let _ = session.spawn_refresh();
            } else {
                tracing::debug!("no runtime, credit balance loads on the next refresh");
            }
        }
        session
    }

    #[must_use]
    pub fn api(&self) -> &Arc<dyn BrainysApi> {
        &self.api
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn credit_balance(&self) -> CreditBalance {
        self.balance
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current user and persist it. `None` removes it.
    pub fn set_user(&self, user: Option<User>) -> ClientResult<()> {
        match &user {
            Some(user) => self.storage.set(USER_KEY, &serde_json::to_string(user)?)?,
            None => self.storage.remove(USER_KEY)?,
        }
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
        Ok(())
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The session token, or [`ClientError::Unauthenticated`] when protected
    /// views must redirect to login.
    pub fn require_token(&self) -> ClientResult<String> {
        self.token().ok_or(ClientError::Unauthenticated)
    }

    /// Persist the session token used for every following request.
    pub fn store_token(&self, token: &str) -> ClientResult<()> {
        self.storage.set(TOKEN_KEY, token)
    }

    pub fn sign_in(&self, token: &str, user: User) -> ClientResult<()> {
        self.store_token(token)?;
        self.set_user(Some(user))
    }

    /// Clear persisted and in-memory state.
    pub fn sign_out(&self) -> ClientResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.set_user(None)?;
        *self.balance.write().unwrap_or_else(PoisonError::into_inner) = CreditBalance::default();
        tracing::info!("signed out");
        Ok(())
    }

    /// Fetch the authoritative credit balance without touching the session.
    pub async fn fetch_credit_balance(&self) -> ClientResult<CreditBalance> {
        let envelope = self.api.get(USER_PROFILE_PATH).await?;
        Ok(balance_from_profile(&envelope.data))
    }

    /// Re-fetch the credit balance and replace the current one. Never fails:
    /// errors are logged and the previous balance is kept.
    pub async fn refresh_user_limit(&self) {
        match self.fetch_credit_balance().await {
            Ok(balance) => {
                tracing::debug!(credit = balance.credit, used = balance.used, "credit balance refreshed");
                *self.balance.write().unwrap_or_else(PoisonError::into_inner) = balance;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to refresh credit balance");
            }
        }
    }

    /// Refresh the credit balance on a detached task. The triggering action
    /// must not await the returned handle.
    #[must_use = "dropping the handle detaches the refresh, use `let _ =` to make that explicit"]
    pub fn spawn_refresh(self: &Arc<Self>) -> BackgroundRefresh {
        let session = Arc::clone(self);
        let handle = tokio::spawn(
            async move { session.refresh_user_limit().await }
                .instrument(tracing::debug_span!("brainys.refresh_user_limit")),
        );
        BackgroundRefresh(handle)
    }
}

/// Handle of a detached credit refresh.
#[derive(Debug)]
pub struct BackgroundRefresh(JoinHandle<()>);

impl BackgroundRefresh {
    /// Wait for the refresh to finish. A panicking refresh is logged.
    pub async fn settled(self) {
        if let Err(error) = self.0.await {
            tracing::warn!(%error, "credit refresh task failed");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// Map the `data` of `/user-profile` onto a balance. Missing fields fall
/// back to zero and the "no active package" name.
fn balance_from_profile(data: &Value) -> CreditBalance {
    let credits = &data["credits"];
    let package_name = data["package"][0]["package_name"]
        .as_str()
        .filter(|name| !name.is_empty())
        .unwrap_or(NO_ACTIVE_PACKAGE)
        .to_string();

    CreditBalance {
        limit: value_to_i64(&credits["limit"]),
        used: value_to_i64(&credits["used"]),
        credit: value_to_i64(&credits["credit"]),
        package_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_profile_payload() {
        let balance = balance_from_profile(&json!({
            "credits": { "limit": 100, "used": "30", "credit": 70.0 },
            "package": [{ "package_name": "Paket Guru" }, { "package_name": "Lama" }]
        }));
        assert_eq!(
            balance,
            CreditBalance {
                limit: 100,
                used: 30,
                credit: 70,
                package_name: "Paket Guru".to_string(),
            }
        );
    }

    #[test]
    fn missing_profile_fields_fall_back_to_defaults() {
        assert_eq!(balance_from_profile(&json!({})), CreditBalance::default());
        assert_eq!(
            balance_from_profile(&json!({ "credits": null, "package": [] })),
            CreditBalance::default()
        );
    }
}
