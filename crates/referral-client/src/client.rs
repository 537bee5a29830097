//! Remote operations of a referral session.
//!
//! [`SessionClient`] turns backend responses into typed outcomes. It never
//! touches the UI; the [`ViewStateController`] decides what each outcome
//! means on screen.
//!
//! [`ViewStateController`]: crate::controller::ViewStateController

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use referral_shared::constants::{
    LOGIN_FAILED_MESSAGE, REFERRAL_SENT_MESSAGE, SIGNUP_SUCCESS_MESSAGE,
};
use referral_shared::protocol::{Credentials, SendReferralRequest};
use referral_shared::{ReferralRecord, UserContext};

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::deeplink;
use crate::error::{ClientError, Result};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    Accepted,
    /// Any message other than the exact success string.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The token is already persisted when this is returned.
    Authenticated(UserContext),
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferralOutcome {
    Sent,
    Rejected(String),
}

pub struct SessionClient {
    backend: Arc<dyn Backend>,
    session: Session,
    config: ClientConfig,
}

impl SessionClient {
    pub fn new(backend: Arc<dyn Backend>, session: Session, config: ClientConfig) -> Self {
        Self {
            backend,
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn sign_up(&self, phone: &str, password: &str) -> Result<SignUpOutcome> {
        let resp = self
            .backend
            .sign_up(&Credentials::new(phone, password))
            .await?;

        if resp.is(SIGNUP_SUCCESS_MESSAGE) {
            info!(phone, "Sign-up accepted");
            Ok(SignUpOutcome::Accepted)
        } else {
            debug!(phone, message = resp.message(), "Sign-up rejected");
            Ok(SignUpOutcome::Rejected(resp.message().to_string()))
        }
    }

    /// Authenticate and persist the returned token and referral code.
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginOutcome> {
        let resp = self
            .backend
            .login(&Credentials::new(phone, password))
            .await?;

        let Some(token) = resp.token() else {
            debug!(phone, "Login rejected");
            let message = resp
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            return Ok(LoginOutcome::Rejected(message));
        };

        self.session.set_token(token)?;
        let user = resp.user();
        self.remember_referral_code(&user)?;

        info!(phone, user_id = ?user.id, "Logged in");
        Ok(LoginOutcome::Authenticated(user))
    }

    /// Deep link inviting `contact`, built from the persisted referral code.
    pub fn referral_link(&self, contact: &str) -> Result<Url> {
        let code = self.session.referral_code()?.unwrap_or_else(|| {
            warn!("No referral code stored, sending link without one");
            String::new()
        });

        Ok(deeplink::referral_link(
            &self.config.messaging_url,
            contact,
            &self.config.site_url,
            &code,
        )?)
    }

    /// Record a referral with the backend.
    pub async fn send_referral(
        &self,
        contact: &str,
        referral_type: &str,
    ) -> Result<ReferralOutcome> {
        let token = self.require_token()?;
        let request = SendReferralRequest {
            referred_phone: contact.to_string(),
            referral_type: referral_type.to_string(),
        };

        let resp = self.backend.send_referral(&token, &request).await?;

        if resp.is(REFERRAL_SENT_MESSAGE) {
            info!(contact, referral_type, "Referral recorded");
            Ok(ReferralOutcome::Sent)
        } else {
            Ok(ReferralOutcome::Rejected(resp.message().to_string()))
        }
    }

    /// Fetch the current user's referrals. Never cached.
    pub async fn list_referrals(&self) -> Result<Vec<ReferralRecord>> {
        let token = self.require_token()?;
        let resp = self.backend.protected(&token).await?;

        let referrals = resp
            .referrals
            .ok_or(ClientError::MalformedResponse("referrals"))?;
        debug!(count = referrals.len(), "Fetched referrals");
        Ok(referrals)
    }

    /// Check a persisted token against the backend.
    ///
    /// Returns `Ok(None)` without any network call when no token is stored,
    /// and `Ok(None)` when the backend does not recognise the token.
    pub async fn restore_session(&self) -> Result<Option<UserContext>> {
        let Some(token) = self.session.token()? else {
            debug!("No persisted token");
            return Ok(None);
        };

        let resp = self.backend.protected(&token).await?;

        match resp.user() {
            Some(user) => {
                self.remember_referral_code(&user)?;
                info!(user_id = ?user.id, "Session restored");
                Ok(Some(user))
            }
            None => {
                info!(message = ?resp.message, "Persisted token rejected");
                Ok(None)
            }
        }
    }

    pub fn clear_token(&self) -> Result<()> {
        self.session.clear_token()
    }

    fn require_token(&self) -> Result<String> {
        self.session.token()?.ok_or(ClientError::NotAuthenticated)
    }

    fn remember_referral_code(&self, user: &UserContext) -> Result<()> {
        if let Some(code) = user.referral_code.as_deref().filter(|c| !c.is_empty()) {
            self.session.set_referral_code(code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use referral_store::{KeyValueStore, MemoryStore};

    use super::*;
    use crate::testing::{FakeBackend, Reply};

    fn client_with(
        backend: Arc<FakeBackend>,
        entries: &[(&str, &str)],
    ) -> (SessionClient, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_entries(entries.iter().copied()));
        let client = SessionClient::new(
            backend,
            Session::new(store.clone()),
            ClientConfig::default(),
        );
        (client, store)
    }

    #[tokio::test]
    async fn test_sign_up_exact_success_message() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("/signup", Reply::json(json!({"message": "Signup successful."})));
        let (client, _) = client_with(backend.clone(), &[]);

        assert_eq!(client.sign_up("9000", "pw").await.unwrap(), SignUpOutcome::Accepted);
        assert_eq!(
            backend.calls()[0].body,
            Some(json!({"phone": "9000", "password": "pw"}))
        );
    }

    #[tokio::test]
    async fn test_sign_up_other_message() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("/signup", Reply::json(json!({"message": "User already exists."})));
        let (client, _) = client_with(backend, &[]);

        assert_eq!(
            client.sign_up("9000", "pw").await.unwrap(),
            SignUpOutcome::Rejected("User already exists.".into())
        );
    }

    #[tokio::test]
    async fn test_login_persists_token_and_referral_code() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply(
            "/login",
            Reply::json(json!({"id": 3, "phone": "9000", "referral_code": "AB12CD34", "token": "abc"})),
        );
        let (client, store) = client_with(backend, &[]);

        let outcome = client.login("9000", "pw").await.unwrap();

        let LoginOutcome::Authenticated(user) = outcome else {
            panic!("expected authentication, got {outcome:?}");
        };
        assert_eq!(user.id, Some(3));
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(store.get("referralCode").unwrap().as_deref(), Some("AB12CD34"));
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_token_alone() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("/login", Reply::json(json!({"message": "bad creds"})));
        let (client, store) = client_with(backend, &[("token", "old")]);

        assert_eq!(
            client.login("9000", "wrong").await.unwrap(),
            LoginOutcome::Rejected("bad creds".into())
        );
        assert_eq!(store.get("token").unwrap().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_login_rejection_without_message() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("/login", Reply::json(json!({"token": ""})));
        let (client, _) = client_with(backend, &[]);

        assert_eq!(
            client.login("9000", "pw").await.unwrap(),
            LoginOutcome::Rejected("Login failed".into())
        );
    }

    #[tokio::test]
    async fn test_login_transport_failure_is_an_error() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("/login", Reply::Broken);
        let (client, store) = client_with(backend, &[]);

        assert!(client.login("9000", "pw").await.is_err());
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[tokio::test]
    async fn test_send_referral_uses_raw_token() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("/send_referral", Reply::json(json!({"message": "Referral sent."})));
        let (client, _) = client_with(backend.clone(), &[("token", "abc")]);

        assert_eq!(
            client.send_referral("555", "Buy").await.unwrap(),
            ReferralOutcome::Sent
        );

        let calls = backend.calls();
        assert_eq!(calls[0].token.as_deref(), Some("abc"));
        assert_eq!(
            calls[0].body,
            Some(json!({"referred_phone": "555", "referral_type": "Buy"}))
        );
    }

    #[tokio::test]
    async fn test_send_referral_without_token() {
        let backend = Arc::new(FakeBackend::new());
        let (client, _) = client_with(backend.clone(), &[]);

        assert!(matches!(
            client.send_referral("555", "Buy").await,
            Err(ClientError::NotAuthenticated)
        ));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_referrals_requires_referrals_field() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("/protected", Reply::json(json!({"message": "Token is invalid or expired!"})));
        let (client, _) = client_with(backend, &[("token", "abc")]);

        assert!(matches!(
            client.list_referrals().await,
            Err(ClientError::MalformedResponse("referrals"))
        ));
    }

    #[tokio::test]
    async fn test_restore_without_token_makes_no_call() {
        let backend = Arc::new(FakeBackend::new());
        let (client, _) = client_with(backend.clone(), &[]);

        assert_eq!(client.restore_session().await.unwrap(), None);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply(
            "/protected",
            Reply::json(json!({"id": 9, "phone": "9000", "referral_code": "ZZ", "referrals": []})),
        );
        let (client, store) = client_with(backend.clone(), &[("token", "abc")]);

        let user = client.restore_session().await.unwrap().unwrap();
        assert_eq!(user.id, Some(9));
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(store.get("referralCode").unwrap().as_deref(), Some("ZZ"));
    }

    #[test]
    fn test_referral_link_embeds_code() {
        let backend = Arc::new(FakeBackend::new());
        let (client, _) = client_with(backend, &[("referralCode", "AB12CD34")]);

        let link = client.referral_link("555").unwrap();
        assert!(link.as_str().starts_with("https://api.whatsapp.com/send?phone=555&text="));
        assert!(link
            .query_pairs()
            .any(|(k, v)| k == "text" && v.ends_with("Referral code: AB12CD34")));
    }
}
