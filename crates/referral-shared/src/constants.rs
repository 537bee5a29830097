/// Storage key of the session token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the logged-in user's referral code
pub const REFERRAL_CODE_KEY: &str = "referralCode";

/// Exact `message` the backend sends on a successful sign-up
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful.";

/// Exact `message` the backend sends once a referral is recorded
pub const REFERRAL_SENT_MESSAGE: &str = "Referral sent.";

/// Delay between a sign-up acknowledgment and the switch to the login view
pub const SIGNUP_REDIRECT_DELAY_MS: u64 = 2000;

/// Alerted when a rejected login carries no message
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Shown for records without a referral type
pub const UNKNOWN_REFERRAL_TYPE: &str = "Unknown";

/// Backend endpoints, relative to the configured API base URL
pub const SIGNUP_PATH: &str = "signup";
pub const LOGIN_PATH: &str = "login";
pub const SEND_REFERRAL_PATH: &str = "send_referral";
pub const PROTECTED_PATH: &str = "protected";

/// Default backend base URL (local development)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Messaging service the referral deep link points at
pub const DEFAULT_MESSAGING_URL: &str = "https://api.whatsapp.com/send";

/// Site advertised in the referral message
pub const DEFAULT_SITE_URL: &str = "https://www.beepkart.com";
