pub mod error;
pub mod olm_session;


pub use error::StoreError;
pub use olm_session::{JsonSessionStore, OlmSessionStore};
