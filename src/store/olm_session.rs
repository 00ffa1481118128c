use crate::codec::SessionCodec;
use crate::entity::{OlmSessionRecord, KEY_SEPARATOR};
use crate::store::error::StoreError;
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use std::marker::PhantomData;
use surrealdb::sql::Datetime;
use surrealdb::{engine::any::Any, Surreal};
use tracing::{debug, warn};

/// Store for serialized Olm sessions, keyed by session id and remote
/// device key.
///
/// Generic over the session type `S` and the codec `C` that turns it into
/// bytes. The store owns its records outright: callers get decoded copies,
/// never references into storage.
pub struct OlmSessionStore<S, C> {
    db: Surreal<Any>,
    codec: C,
    _session: PhantomData<fn() -> S>,
}

/// Session store using the JSON codec.
pub type JsonSessionStore<S> = OlmSessionStore<S, crate::codec::JsonSessionCodec>;

impl<S, C: Clone> Clone for OlmSessionStore<S, C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            codec: self.codec.clone(),
            _session: PhantomData,
        }
    }
}

impl<S, C> OlmSessionStore<S, C>
where
    C: SessionCodec<S>,
{
    pub fn new(db: Surreal<Any>, codec: C) -> Self {
        Self {
            db,
            codec,
            _session: PhantomData,
        }
    }

    /// Persist a session under `session_id` and `device_key`, replacing any
    /// previous blob for that pair.
    ///
    /// The record's creation time survives overwrites; only `updated_at`
    /// moves forward.
    pub async fn put(
        &self,
        session_id: &str,
        device_key: &str,
        session: &S,
    ) -> Result<(), StoreError> {
        validate_key_component("session_id", session_id)?;
        validate_key_component("device_key", device_key)?;

        let blob = self
            .codec
            .encode(session)
            .map_err(|e| StoreError::Serialization {
                message: e.to_string(),
            })?;

        let primary_key = OlmSessionRecord::primary_key_for(session_id, device_key);
        debug!("Storing olm session {}", primary_key);

        // Keep the original creation time across ratchet advances
        let existing: Option<OlmSessionRecord> =
            self.db.select(("olm_session", primary_key.as_str())).await?;
        let created_at = existing
            .map(|r| r.created_at)
            .unwrap_or_else(|| Datetime::from(Utc::now()));

        let record = OlmSessionRecord {
            primary_key: primary_key.clone(),
            session_id: session_id.to_string(),
            device_key: device_key.to_string(),
            session_blob: general_purpose::STANDARD.encode(&blob),
            created_at,
            updated_at: Datetime::from(Utc::now()),
        };

        let _: Option<OlmSessionRecord> = self
            .db
            .upsert(("olm_session", primary_key.as_str()))
            .content(record)
            .await?;

        Ok(())
    }

    /// Load the session stored for `session_id` and `device_key`.
    ///
    /// Returns `Ok(None)` when no record exists. A record whose blob can
    /// no longer be decoded fails with [`StoreError::CorruptRecord`].
    pub async fn get(
        &self,
        session_id: &str,
        device_key: &str,
    ) -> Result<Option<S>, StoreError> {
        validate_key_component("session_id", session_id)?;
        validate_key_component("device_key", device_key)?;

        let primary_key = OlmSessionRecord::primary_key_for(session_id, device_key);
        debug!("Loading olm session {}", primary_key);

        let record: Option<OlmSessionRecord> =
            self.db.select(("olm_session", primary_key.as_str())).await?;

        let record = match record {
            Some(record) => record,
            None => return Ok(None),
        };

        let blob = general_purpose::STANDARD
            .decode(&record.session_blob)
            .map_err(|e| {
                warn!("Session record {} holds invalid base64", primary_key);
                StoreError::CorruptRecord {
                    primary_key: primary_key.clone(),
                    message: format!("Invalid base64 blob: {}", e),
                }
            })?;

        let session = self.codec.decode(&blob).map_err(|e| {
            warn!("Session record {} failed to decode", primary_key);
            StoreError::CorruptRecord {
                primary_key: primary_key.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(Some(session))
    }

    /// Remove the session for `session_id` and `device_key`, if present.
    pub async fn delete(&self, session_id: &str, device_key: &str) -> Result<(), StoreError> {
        validate_key_component("session_id", session_id)?;
        validate_key_component("device_key", device_key)?;

        let primary_key = OlmSessionRecord::primary_key_for(session_id, device_key);
        debug!("Deleting olm session {}", primary_key);

        let _: Option<OlmSessionRecord> =
            self.db.delete(("olm_session", primary_key.as_str())).await?;

        Ok(())
    }

    /// Session ids stored for one device key, most recently written first.
    pub async fn session_ids_for_device(
        &self,
        device_key: &str,
    ) -> Result<Vec<String>, StoreError> {
        validate_key_component("device_key", device_key)?;
        debug!("Listing olm sessions for device {}", device_key);

        let query = "SELECT session_id, updated_at FROM olm_session WHERE device_key = $device_key ORDER BY updated_at DESC";
        let mut result = self
            .db
            .query(query)
            .bind(("device_key", device_key.to_string()))
            .await?;

        let session_ids: Vec<String> = result.take((0, "session_id"))?;
        Ok(session_ids)
    }

    /// Remove every session stored for one device key.
    ///
    /// Returns how many records were removed.
    pub async fn delete_sessions_for_device(&self, device_key: &str) -> Result<u64, StoreError> {
        validate_key_component("device_key", device_key)?;
        debug!("Deleting olm sessions for device {}", device_key);

        let query = "DELETE FROM olm_session WHERE device_key = $device_key RETURN BEFORE";
        let mut result = self
            .db
            .query(query)
            .bind(("device_key", device_key.to_string()))
            .await?;

        let deleted: Vec<OlmSessionRecord> = result.take(0)?;
        Ok(deleted.len() as u64)
    }
}

fn validate_key_component(field: &str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::Validation {
            field: field.to_string(),
            message: "Must not be empty".to_string(),
        });
    }

    if value.contains(KEY_SEPARATOR) {
        return Err(StoreError::Validation {
            field: field.to_string(),
            message: format!("Must not contain '{}'", KEY_SEPARATOR),
        });
    }

    Ok(())
}
