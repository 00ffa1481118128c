#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Persistence for Olm cryptographic sessions.
//!
//! Sessions are stored as opaque serialized blobs in an embedded SurrealDB
//! database, keyed by the pair of session id and remote device key. Turning
//! a live session into bytes (and back) is delegated to a [`SessionCodec`]
//! supplied by the caller; the store never interprets session contents.

pub mod codec;
pub mod config;
pub mod db;
pub mod entity;
pub mod store;
pub mod test_utils;

pub use codec::{CodecError, JsonSessionCodec, SessionCodec};
pub use config::StoreConfig;
pub use entity::{OlmSessionRecord, KEY_SEPARATOR};
pub use store::{JsonSessionStore, OlmSessionStore, StoreError};
