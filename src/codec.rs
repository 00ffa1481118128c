use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Session encode failed: {0}")]
    Encode(String),

    #[error("Session decode failed: {0}")]
    Decode(String),
}

/// Converts live session objects to and from the opaque byte form the
/// store persists.
///
/// The component that owns the session type supplies an implementation
/// when constructing the store; the store itself never looks inside the
/// bytes. Decoding is expected to fail loudly on bytes it did not produce.
pub trait SessionCodec<S> {
    fn encode(&self, session: &S) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, blob: &[u8]) -> Result<S, CodecError>;
}

/// JSON codec for any serde-compatible session type.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSessionCodec;

impl<S> SessionCodec<S> for JsonSessionCodec
where
    S: Serialize + DeserializeOwned,
{
    fn encode(&self, session: &S) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(session).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, blob: &[u8]) -> Result<S, CodecError> {
        serde_json::from_slice(blob).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
