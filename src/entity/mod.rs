pub mod olm_session;

pub use olm_session::{OlmSessionRecord, KEY_SEPARATOR};
