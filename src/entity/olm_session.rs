use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

/// Separator between the session id and the device key in a primary key.
///
/// Key components must never contain this character; the store rejects
/// them before they reach the database.
pub const KEY_SEPARATOR: char = '|';

/// One persisted Olm session.
///
/// `session_blob` holds the base64 text of whatever bytes the codec
/// produced for the live session. Nothing here inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OlmSessionRecord {
    pub primary_key: String,
    pub session_id: String,
    pub device_key: String,
    pub session_blob: String,
    pub created_at: Datetime,
    pub updated_at: Datetime,
}

impl OlmSessionRecord {
    /// Derive the primary key for a session id and device key pair.
    ///
    /// Deterministic, and injective as long as neither component contains
    /// [`KEY_SEPARATOR`].
    pub fn primary_key_for(session_id: &str, device_key: &str) -> String {
        format!("{}{}{}", session_id, KEY_SEPARATOR, device_key)
    }
}
