use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::UNKNOWN_REFERRAL_TYPE;

/// The four mutually exclusive screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Initial,
    SignUp,
    Login,
    ReferralDashboard,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Initial,
        View::SignUp,
        View::Login,
        View::ReferralDashboard,
    ];

    /// Stable identifier of the view's panel.
    pub fn id(&self) -> &'static str {
        match self {
            View::Initial => "initial",
            View::SignUp => "signup",
            View::Login => "login",
            View::ReferralDashboard => "referral",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// One referred contact as reported by `/protected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralRecord {
    pub referred_phone: String,

    /// Whether the referred contact completed a purchase.
    /// Missing or `null` on the wire reads as pending.
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchased: bool,

    #[serde(rename = "type", default)]
    pub referral_type: Option<String>,
}

impl ReferralRecord {
    pub fn status(&self) -> &'static str {
        if self.purchased {
            "Event Done"
        } else {
            "Event Pending"
        }
    }

    /// Referral type, or `"Unknown"` when absent or empty.
    pub fn kind(&self) -> &str {
        match self.referral_type.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => UNKNOWN_REFERRAL_TYPE,
        }
    }

    /// Line shown on the dashboard, e.g. `555 - Event Done - Type: Buy`.
    pub fn display_line(&self) -> String {
        format!(
            "{} - {} - Type: {}",
            self.referred_phone,
            self.status(),
            self.kind()
        )
    }
}

impl std::fmt::Display for ReferralRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_line())
    }
}

/// User fields returned next to a token or by a session check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    pub id: Option<i64>,
    pub phone: Option<String>,
    pub referral_code: Option<String>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
