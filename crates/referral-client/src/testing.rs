//! Fakes standing in for the network, the screen and the browser in tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use referral_shared::protocol::{
    Credentials, LoginResponse, MessageResponse, ProtectedResponse, SendReferralRequest,
};
use referral_shared::View;

use crate::backend::Backend;
use crate::error::Result;
use crate::viewport::{Navigator, SignUpFeedback, ViewPort};

/// Scripted answer for one endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// The body is not JSON, as with a proxy error page.
    Broken,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Reply::Json(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub path: &'static str,
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// [`Backend`] answering every call to a path with the same scripted reply.
#[derive(Debug, Default)]
pub struct FakeBackend {
    replies: Mutex<HashMap<&'static str, Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, path: &'static str, reply: Reply) {
        self.replies.lock().unwrap().insert(path, reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.path == path).count()
    }

    fn answer<T: DeserializeOwned>(
        &self,
        path: &'static str,
        token: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> Result<T> {
        self.calls.lock().unwrap().push(Call {
            path,
            token: token.map(str::to_string),
            body: body.map(|b| serde_json::to_value(b).unwrap()),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| panic!("no reply scripted for {path}"));

        match reply {
            Reply::Json(value) => Ok(serde_json::from_value(value)?),
            Reply::Broken => Ok(serde_json::from_str("<html>Bad Gateway</html>")?),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn sign_up(&self, credentials: &Credentials) -> Result<MessageResponse> {
        self.answer("/signup", None, Some(credentials))
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.answer("/login", None, Some(credentials))
    }

    async fn send_referral(
        &self,
        token: &str,
        request: &SendReferralRequest,
    ) -> Result<MessageResponse> {
        self.answer("/send_referral", Some(token), Some(request))
    }

    async fn protected(&self, token: &str) -> Result<ProtectedResponse> {
        self.answer("/protected", Some(token), None::<&()>)
    }
}

/// [`ViewPort`] keeping the rendered state in memory.
#[derive(Debug)]
pub struct RecordingViewPort {
    visible: Mutex<HashSet<View>>,
    feedback: Mutex<SignUpFeedback>,
    referrals: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl Default for RecordingViewPort {
    fn default() -> Self {
        Self {
            visible: Mutex::new(HashSet::new()),
            feedback: Mutex::new(SignUpFeedback::Hidden),
            referrals: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingViewPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> Vec<View> {
        let visible = self.visible.lock().unwrap();
        View::ALL
            .into_iter()
            .filter(|v| visible.contains(v))
            .collect()
    }

    pub fn feedback(&self) -> SignUpFeedback {
        self.feedback.lock().unwrap().clone()
    }

    pub fn referrals(&self) -> Vec<String> {
        self.referrals.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl ViewPort for RecordingViewPort {
    fn activate(&self, view: View) {
        self.visible.lock().unwrap().insert(view);
    }

    fn deactivate(&self, view: View) {
        self.visible.lock().unwrap().remove(&view);
    }

    fn show_sign_up_feedback(&self, feedback: SignUpFeedback) {
        *self.feedback.lock().unwrap() = feedback;
    }

    fn render_referrals(&self, lines: &[String]) {
        *self.referrals.lock().unwrap() = lines.to_vec();
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Url>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Url> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &Url) {
        self.visited.lock().unwrap().push(url.clone());
    }
}
