//! Capabilities the controller drives instead of touching a UI directly.

use referral_shared::View;
use url::Url;

/// State of the message area under the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpFeedback {
    /// Neither the success indicator nor the error is shown.
    Hidden,
    Success,
    Error(String),
}

/// The visible surface of the client.
pub trait ViewPort: Send + Sync {
    fn activate(&self, view: View);

    fn deactivate(&self, view: View);

    fn show_sign_up_feedback(&self, feedback: SignUpFeedback);

    /// Replace the dashboard's referral list with `lines`.
    fn render_referrals(&self, lines: &[String]);

    /// Blocking, user-acknowledged message.
    fn alert(&self, message: &str);
}

/// Leaves the client for an external URL (the messaging deep link).
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url);
}
