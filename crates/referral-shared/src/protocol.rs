//! JSON bodies exchanged with the referral backend.
//!
//! The backend answers failures with a `{"message": ...}` body and a 4xx
//! status, so every response type keeps its fields optional and callers
//! decide on the shape of the body alone.

use serde::{Deserialize, Serialize};

use crate::types::{ReferralRecord, UserContext};

/// Body of `POST /signup` and `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub phone: String,
    pub password: String,
}

impl Credentials {
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /send_referral`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReferralRequest {
    pub referred_phone: String,
    pub referral_type: String,
}

/// Response carrying only a status message (`/signup`, `/send_referral`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Whether the message equals `expected` exactly.
    pub fn is(&self, expected: &str) -> bool {
        self.message.as_deref() == Some(expected)
    }
}

/// Response of `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
}

impl LoginResponse {
    /// The token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn user(&self) -> UserContext {
        UserContext {
            id: self.id,
            phone: self.phone.clone(),
            referral_code: self.referral_code.clone(),
        }
    }
}

/// Response of `GET /protected`: session check and referral listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProtectedResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub referrals: Option<Vec<ReferralRecord>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProtectedResponse {
    /// The user context, if the token identified a user.
    pub fn user(&self) -> Option<UserContext> {
        self.id.map(|id| UserContext {
            id: Some(id),
            phone: self.phone.clone(),
            referral_code: self.referral_code.clone(),
        })
    }
}
