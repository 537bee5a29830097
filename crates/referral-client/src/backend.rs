//! HTTP access to the referral backend.
//!
//! [`Backend`] is the seam between the session logic and the network.  The
//! production implementation, [`HttpBackend`], speaks JSON over `reqwest`;
//! tests substitute a scripted fake.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use referral_shared::constants::{LOGIN_PATH, PROTECTED_PATH, SEND_REFERRAL_PATH, SIGNUP_PATH};
use referral_shared::protocol::{
    Credentials, LoginResponse, MessageResponse, ProtectedResponse, SendReferralRequest,
};

use crate::config::ClientConfig;
use crate::error::Result;

/// The four remote calls the client makes.
///
/// Implementations report transport and decoding failures as errors. A
/// well-formed error body (e.g. `{"message": "Invalid credentials"}` with a
/// 401) is a successful call.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn sign_up(&self, credentials: &Credentials) -> Result<MessageResponse>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// `token` is sent verbatim in the `Authorization` header.
    async fn send_referral(
        &self,
        token: &str,
        request: &SendReferralRequest,
    ) -> Result<MessageResponse>;

    /// Session check and referral listing share this endpoint.
    async fn protected(&self, token: &str) -> Result<ProtectedResponse>;
}

/// [`Backend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Read the body as JSON regardless of status; the status is not
    /// interpreted.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, bytes = body.len(), "backend response");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn sign_up(&self, credentials: &Credentials) -> Result<MessageResponse> {
        let url = self.config.endpoint(SIGNUP_PATH)?;
        let resp = self.http.post(url).json(credentials).send().await?;
        Self::decode(resp).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.config.endpoint(LOGIN_PATH)?;
        let resp = self.http.post(url).json(credentials).send().await?;
        Self::decode(resp).await
    }

    async fn send_referral(
        &self,
        token: &str,
        request: &SendReferralRequest,
    ) -> Result<MessageResponse> {
        let url = self.config.endpoint(SEND_REFERRAL_PATH)?;
        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, token)
            .json(request)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn protected(&self, token: &str) -> Result<ProtectedResponse> {
        let url = self.config.endpoint(PROTECTED_PATH)?;
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        Self::decode(resp).await
    }
}
