//! # referral-shared
//!
//! Types shared by the referral client crates: the view enum, the records
//! rendered on the dashboard, and the JSON payloads of the backend's HTTP
//! contract.

pub mod constants;
pub mod protocol;
pub mod types;

pub use types::{ReferralRecord, UserContext, View};
