//! View state machine of the referral client.
//!
//! Exactly one [`View`] is active at a time. Every transition deactivates all
//! other views before activating the target, so the invariant holds no matter
//! which state a transition is requested from.
//!
//! Network calls are never cancelled by a transition: a response that arrives
//! after the user moved on is still applied (for example a slow sign-up
//! acknowledgment still schedules the switch to the login view).

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use referral_shared::{UserContext, View};

use crate::client::{LoginOutcome, ReferralOutcome, SessionClient, SignUpOutcome};
use crate::error::{ClientError, Result};
use crate::viewport::{Navigator, SignUpFeedback, ViewPort};

pub struct ViewStateController {
    client: Arc<SessionClient>,
    viewport: Arc<dyn ViewPort>,
    navigator: Arc<dyn Navigator>,
    signup_redirect_delay: Duration,
    active: Mutex<View>,
}

impl ViewStateController {
    pub fn new(
        client: Arc<SessionClient>,
        viewport: Arc<dyn ViewPort>,
        navigator: Arc<dyn Navigator>,
        signup_redirect_delay: Duration,
    ) -> Self {
        Self {
            client,
            viewport,
            navigator,
            signup_redirect_delay,
            active: Mutex::new(View::Initial),
        }
    }

    pub fn active_view(&self) -> View {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn activate(&self, view: View) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        for other in View::ALL.into_iter().filter(|v| *v != view) {
            self.viewport.deactivate(other);
        }
        self.viewport.activate(view);

        let previous = std::mem::replace(&mut *active, view);
        if previous != view {
            debug!(from = %previous, to = %view, "View transition");
        }
    }

    /// Landing view; also hides any sign-up success or error message.
    pub fn show_initial(&self) {
        self.activate(View::Initial);
        self.viewport.show_sign_up_feedback(SignUpFeedback::Hidden);
    }

    pub fn show_sign_up(&self) {
        self.activate(View::SignUp);
    }

    pub fn show_login(&self) {
        self.activate(View::Login);
    }

    /// Switch to the dashboard and load the referral list.
    ///
    /// Fails with [`ClientError::NotAuthenticated`], leaving the view as it
    /// was, when no session token is stored.
    pub async fn show_referral_dashboard(&self, user: &UserContext) -> Result<()> {
        if !self.client.session().is_authenticated()? {
            return Err(ClientError::NotAuthenticated);
        }

        self.activate(View::ReferralDashboard);
        debug!(user_id = ?user.id, phone = ?user.phone, "Dashboard shown");

        self.refresh_referrals().await;
        Ok(())
    }

    /// Replace the rendered referral list with a fresh copy from the backend.
    /// On failure the previous list stays on screen.
    pub async fn refresh_referrals(&self) {
        match self.client.list_referrals().await {
            Ok(records) => {
                let lines: Vec<String> = records.iter().map(|r| r.display_line()).collect();
                self.viewport.render_referrals(&lines);
            }
            Err(e) => error!(error = %e, "Failed to load referrals"),
        }
    }

    /// Forget the session token and return to the landing view.
    pub fn logout(&self) -> Result<()> {
        self.client.clear_token()?;
        info!("Logged out");
        self.show_initial();
        Ok(())
    }

    /// Settle on the first view: the dashboard when the persisted token is
    /// still accepted, the landing view otherwise.
    pub async fn start(&self) {
        match self.client.restore_session().await {
            Ok(Some(user)) => {
                if let Err(e) = self.show_referral_dashboard(&user).await {
                    error!(error = %e, "Could not restore dashboard");
                    self.show_initial();
                }
            }
            Ok(None) => self.show_initial(),
            Err(e) => {
                error!(error = %e, "Session check failed");
                self.show_initial();
            }
        }
    }

    /// Submit the sign-up form.
    ///
    /// On success the login view follows after the configured delay; the
    /// returned handle resolves once that transition happened.
    pub async fn submit_sign_up(
        self: &Arc<Self>,
        phone: &str,
        password: &str,
    ) -> Option<JoinHandle<()>> {
        match self.client.sign_up(phone, password).await {
            Ok(SignUpOutcome::Accepted) => {
                self.viewport.show_sign_up_feedback(SignUpFeedback::Success);

                let delay = tokio::time::sleep(self.signup_redirect_delay);
                let this = Arc::clone(self);
                Some(tokio::spawn(async move {
                    delay.await;
                    this.show_login();
                }))
            }
            Ok(SignUpOutcome::Rejected(message)) => {
                self.viewport
                    .show_sign_up_feedback(SignUpFeedback::Error(message));
                None
            }
            Err(e) => {
                error!(error = %e, "Sign-up request failed");
                None
            }
        }
    }

    /// Submit the login form.
    pub async fn submit_login(&self, phone: &str, password: &str) {
        match self.client.login(phone, password).await {
            Ok(LoginOutcome::Authenticated(user)) => {
                if let Err(e) = self.show_referral_dashboard(&user).await {
                    error!(error = %e, "Could not open dashboard after login");
                }
            }
            Ok(LoginOutcome::Rejected(message)) => self.viewport.alert(&message),
            Err(e) => error!(error = %e, "Login request failed"),
        }
    }

    /// Open the messaging deep link, then record the referral.
    ///
    /// Navigation happens first and does not wait for the backend; the
    /// request runs as a detached task whose outcome may never be seen if
    /// navigating leaves the client. The returned handle resolves when the
    /// request (and any list refresh) completed.
    pub fn submit_referral(self: &Arc<Self>, contact: &str, referral_type: &str) -> JoinHandle<()> {
        match self.client.referral_link(contact) {
            Ok(link) => {
                info!(contact, "Opening referral link");
                self.navigator.navigate(&link);
            }
            Err(e) => error!(error = %e, "Failed to build referral link"),
        }

        let this = Arc::clone(self);
        let contact = contact.to_string();
        let referral_type = referral_type.to_string();
        tokio::spawn(async move {
            match this.client.send_referral(&contact, &referral_type).await {
                Ok(ReferralOutcome::Sent) => this.refresh_referrals().await,
                Ok(ReferralOutcome::Rejected(message)) => this.viewport.alert(&message),
                Err(e) => error!(error = %e, "Referral request failed"),
            }
        })
    }
}
