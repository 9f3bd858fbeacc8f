//! Wire types for the Inky extension message protocol.
//!
//! This crate contains the serde-serializable shapes exchanged between the
//! popup, the background script and the reader content script, plus the
//! persisted storage keys they agree on.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with the extension messages: `action`-tagged JSON objects
//! * Stable: Changes only when the message shapes change
//!
//! Reader behavior lives in `inky-reader`.

pub mod message;
pub mod storage;

pub use message::*;
pub use storage::*;
