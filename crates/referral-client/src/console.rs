//! Terminal front-end: prints the active view and reads commands from stdin.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use url::Url;

use referral_shared::View;

use crate::controller::ViewStateController;
use crate::viewport::{Navigator, SignUpFeedback, ViewPort};

const HELP: &str = "\
commands:
  home                          back to the landing view
  signup [<phone> <password>]   open the sign-up form, or submit it
  login [<phone> <password>]    open the login form, or submit it
  refer <contact> <Buy|Sell>    send a referral link and record it
  list                          reload the referral list
  logout                        forget the session
  view                          print the active view
  help                          this text
  quit                          exit";

/// [`ViewPort`] writing to stdout.
#[derive(Debug, Default)]
pub struct ConsoleViewPort;

impl ConsoleViewPort {
    fn print(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
        let _ = stdout.flush();
    }
}

impl ViewPort for ConsoleViewPort {
    fn activate(&self, view: View) {
        let title = match view {
            View::Initial => "Welcome. Sign up or log in to start referring friends.",
            View::SignUp => "Sign up: signup <phone> <password>",
            View::Login => "Log in: login <phone> <password>",
            View::ReferralDashboard => "Your referrals (refer <contact> <Buy|Sell>):",
        };
        self.print(&format!("== {title}"));
    }

    fn deactivate(&self, _view: View) {}

    fn show_sign_up_feedback(&self, feedback: SignUpFeedback) {
        match feedback {
            SignUpFeedback::Hidden => {}
            SignUpFeedback::Success => {
                self.print("Sign-up successful! Redirecting to login...")
            }
            SignUpFeedback::Error(message) => self.print(&format!("Sign-up failed: {message}")),
        }
    }

    fn render_referrals(&self, lines: &[String]) {
        if lines.is_empty() {
            self.print("  (no referrals yet)");
        }
        for line in lines {
            self.print(&format!("  - {line}"));
        }
    }

    fn alert(&self, message: &str) {
        self.print(&format!("[!] {message}"));
    }
}

/// Prints the deep link for the user to open.
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, url: &Url) {
        info!(host = ?url.host_str(), "Navigating to messaging link");
        println!("Open this link to send the referral:\n{url}");
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    SignUp(Option<(String, String)>),
    Login(Option<(String, String)>),
    Refer { contact: String, referral_type: String },
    List,
    Logout,
    View,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err("empty command".into());
        };
        let args: Vec<&str> = words.collect();

        let credentials = |args: &[&str]| match args {
            [] => Ok(None),
            [phone, password] => Ok(Some((phone.to_string(), password.to_string()))),
            _ => Err(format!("usage: {name} [<phone> <password>]")),
        };

        match name.to_ascii_lowercase().as_str() {
            "home" => Ok(Command::Home),
            "signup" => credentials(&args).map(Command::SignUp),
            "login" => credentials(&args).map(Command::Login),
            "refer" => match args.as_slice() {
                [contact, referral_type] => Ok(Command::Refer {
                    contact: contact.to_string(),
                    referral_type: referral_type.to_string(),
                }),
                _ => Err("usage: refer <contact> <Buy|Sell>".into()),
            },
            "list" => Ok(Command::List),
            "logout" => Ok(Command::Logout),
            "view" => Ok(Command::View),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command `{other}`, try `help`")),
        }
    }
}

/// Read commands until `quit` or end of input.
pub async fn command_loop(controller: Arc<ViewStateController>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Home => controller.show_initial(),
            Command::SignUp(None) => controller.show_sign_up(),
            Command::SignUp(Some((phone, password))) => {
                // the redirect task runs on its own
                let _ = controller.submit_sign_up(&phone, &password).await;
            }
            Command::Login(None) => controller.show_login(),
            Command::Login(Some((phone, password))) => {
                controller.submit_login(&phone, &password).await
            }
            Command::Refer {
                contact,
                referral_type,
            } => {
                let _ = controller.submit_referral(&contact, &referral_type);
            }
            Command::List => controller.refresh_referrals().await,
            Command::Logout => {
                if let Err(e) = controller.logout() {
                    warn!(error = %e, "Logout failed");
                }
            }
            Command::View => println!("{}", controller.active_view()),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    info!("Console closed");
    Ok(())
}
