//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the client runs against a local backend
//! with zero configuration.

use std::path::PathBuf;
use std::time::Duration;

use referral_shared::constants::{
    DEFAULT_API_URL, DEFAULT_MESSAGING_URL, DEFAULT_SITE_URL, SIGNUP_REDIRECT_DELAY_MS,
};
use url::Url;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the referral backend.
    /// Env: `REFERRAL_API_URL`
    /// Default: `http://127.0.0.1:5000`
    pub api_url: String,

    /// Endpoint of the messaging service the referral deep link opens.
    /// Env: `REFERRAL_MESSAGING_URL`
    /// Default: `https://api.whatsapp.com/send`
    pub messaging_url: String,

    /// Site advertised in the referral message.
    /// Env: `REFERRAL_SITE_URL`
    /// Default: `https://www.beepkart.com`
    pub site_url: String,

    /// Pause between a successful sign-up and the login view.
    /// Env: `REFERRAL_SIGNUP_REDIRECT_MS`
    /// Default: 2000 ms
    pub signup_redirect_delay: Duration,

    /// Location of the local database.
    /// Env: `REFERRAL_DB_PATH`
    /// Default: `None` (platform data directory).
    pub db_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            messaging_url: DEFAULT_MESSAGING_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            signup_redirect_delay: Duration::from_millis(SIGNUP_REDIRECT_DELAY_MS),
            db_path: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = var("REFERRAL_API_URL") {
            match Url::parse(&raw) {
                Ok(_) => config.api_url = raw,
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Invalid REFERRAL_API_URL, using default")
                }
            }
        }

        if let Some(raw) = var("REFERRAL_MESSAGING_URL") {
            match Url::parse(&raw) {
                Ok(_) => config.messaging_url = raw,
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Invalid REFERRAL_MESSAGING_URL, using default")
                }
            }
        }

        if let Some(site) = var("REFERRAL_SITE_URL") {
            if !site.is_empty() {
                config.site_url = site;
            }
        }

        if let Some(raw) = var("REFERRAL_SIGNUP_REDIRECT_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.signup_redirect_delay = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "Invalid REFERRAL_SIGNUP_REDIRECT_MS, using default")
                }
            }
        }

        if let Some(path) = var("REFERRAL_DB_PATH") {
            if !path.is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Resolve a backend path such as `login` under [`Self::api_url`],
    /// keeping any path prefix of the base.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(&self.api_url)?;
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }
        base.join(path.trim_start_matches('/'))
    }
}
