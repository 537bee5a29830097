//! # referral-client
//!
//! Client side of the referral programme: a four-view state machine
//! ([`controller::ViewStateController`]) on top of the backend session
//! ([`client::SessionClient`]). The screen, the browser and local storage are
//! injected capabilities, so the same logic runs behind the bundled terminal
//! front-end or in tests.

pub mod backend;
pub mod client;
pub mod config;
pub mod console;
pub mod controller;
pub mod deeplink;
pub mod error;
pub mod session;
pub mod viewport;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use referral_store::{Database, KeyValueStore};

use crate::backend::HttpBackend;
use crate::client::SessionClient;
use crate::config::ClientConfig;
use crate::console::{ConsoleNavigator, ConsoleViewPort};
use crate::controller::ViewStateController;
use crate::session::Session;

pub use crate::error::{ClientError, Result};

/// Install the global `tracing` subscriber (respects `RUST_LOG`).
///
/// Diagnostics go to stderr so they do not interleave with the console UI.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("referral_client=debug,referral_client_lib=debug,referral_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Open local storage, restore the session and run the terminal front-end.
pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let store: Arc<dyn KeyValueStore> = Arc::new(match &config.db_path {
        Some(path) => Database::open_at(path)?,
        None => Database::new()?,
    });

    let backend = Arc::new(HttpBackend::new(config.clone()));
    let client = Arc::new(SessionClient::new(
        backend,
        Session::new(store),
        config.clone(),
    ));
    let controller = Arc::new(ViewStateController::new(
        client,
        Arc::new(ConsoleViewPort),
        Arc::new(ConsoleNavigator),
        config.signup_redirect_delay,
    ));

    info!(api = %config.api_url, "Restoring session");
    controller.start().await;

    console::command_loop(controller).await
}
