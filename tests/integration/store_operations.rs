use olmstore::db;
use olmstore::{JsonSessionCodec, OlmSessionStore, StoreConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PickledSession {
    pickle: String,
    ratchet_index: u32,
}

fn sample_session(index: u32) -> PickledSession {
    PickledSession {
        pickle: format!("olm_pickle_{}", index),
        ratchet_index: index,
    }
}

fn test_config(dir: &TempDir) -> StoreConfig {
    StoreConfig {
        path: dir.path().join("olm_test.db").to_string_lossy().to_string(),
        ..StoreConfig::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_sessions_survive_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&dir);

    {
        let db = db::connect(&config).await.expect("Failed to open store");
        let store = OlmSessionStore::new(db, JsonSessionCodec);

        store.put("sess1", "deviceA", &sample_session(1)).await
            .expect("Failed to put first session");
        store.put("sess2", "deviceA", &sample_session(2)).await
            .expect("Failed to put second session");
    }

    // The dropped handle releases the datastore asynchronously
    tokio::time::sleep(Duration::from_millis(200)).await;

    let db = db::connect(&config).await.expect("Failed to reopen store");
    let store = OlmSessionStore::new(db, JsonSessionCodec);

    let loaded = store.get("sess1", "deviceA").await
        .expect("Failed to get session after reopen");
    assert_eq!(loaded, Some(sample_session(1)));

    let ids = store.session_ids_for_device("deviceA").await
        .expect("Failed to list sessions after reopen");
    assert_eq!(ids.len(), 2);
}

#[tokio::test]
async fn test_schema_bootstrap_is_idempotent() {
    init_tracing();
    let db = db::connect_memory().await.expect("Failed to open in-memory store");

    // Applying the schema again must not disturb anything
    db::define_tables(&db).await.expect("Failed to re-apply schema");

    let store = OlmSessionStore::new(db, JsonSessionCodec);
    store.put("sess1", "deviceA", &sample_session(1)).await
        .expect("Failed to put session");

    let loaded = store.get("sess1", "deviceA").await.expect("Failed to get session");
    assert_eq!(loaded, Some(sample_session(1)));
}

#[tokio::test]
async fn test_concurrent_puts_to_distinct_keys() {
    init_tracing();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&dir);

    let db = db::connect(&config).await.expect("Failed to open store");
    let store = OlmSessionStore::new(db, JsonSessionCodec);

    // The joined futures borrow their sessions until every put resolves
    let session1 = sample_session(1);
    let session2 = sample_session(2);
    let session3 = sample_session(3);
    let session4 = sample_session(4);

    let (a, b, c, d) = tokio::join!(
        store.put("sess1", "deviceA", &session1),
        store.put("sess2", "deviceA", &session2),
        store.put("sess1", "deviceB", &session3),
        store.put("sess3", "deviceC", &session4),
    );
    a.expect("Failed to put sess1/deviceA");
    b.expect("Failed to put sess2/deviceA");
    c.expect("Failed to put sess1/deviceB");
    d.expect("Failed to put sess3/deviceC");

    let loaded = store.get("sess1", "deviceA").await.expect("Failed to get sess1/deviceA");
    assert_eq!(loaded, Some(session1));
    let loaded = store.get("sess2", "deviceA").await.expect("Failed to get sess2/deviceA");
    assert_eq!(loaded, Some(session2));
    let loaded = store.get("sess1", "deviceB").await.expect("Failed to get sess1/deviceB");
    assert_eq!(loaded, Some(session3));
    let loaded = store.get("sess3", "deviceC").await.expect("Failed to get sess3/deviceC");
    assert_eq!(loaded, Some(session4));
}

#[tokio::test]
async fn test_primary_key_unique_index() {
    init_tracing();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&dir);

    let db = db::connect(&config).await.expect("Failed to open store");
    let store = OlmSessionStore::new(db.clone(), JsonSessionCodec);

    store.put("sess1", "deviceA", &sample_session(1)).await
        .expect("Failed to put session");

    // A second record carrying the same primary key must be refused
    let duplicate = db
        .query(
            "CREATE olm_session SET primary_key = $pk, session_id = 'sess1', \
             device_key = 'deviceA', session_blob = '', created_at = time::now(), \
             updated_at = time::now()",
        )
        .bind(("pk", "sess1|deviceA".to_string()))
        .await
        .expect("Failed to run duplicate insert")
        .check();
    assert!(duplicate.is_err());
}
