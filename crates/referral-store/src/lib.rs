//! # referral-store
//!
//! Durable client-side key/value storage for the referral client.
//!
//! The client only ever keeps two strings around between runs (the session
//! token and the user's referral code), so the whole crate is a small
//! [`KeyValueStore`] capability with a SQLite-backed implementation for real
//! use and an in-memory one for tests and throwaway sessions.

pub mod database;
pub mod kv;
pub mod memory;
pub mod migrations;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
