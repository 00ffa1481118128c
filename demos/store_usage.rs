use olmstore::db;
use olmstore::{JsonSessionCodec, OlmSessionStore, StoreConfig};
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PickledSession {
    pickle: String,
    ratchet_index: u32,
}

fn main() {
    // Create a tokio runtime for async operations
    let runtime = Runtime::new().expect("Failed to create runtime");

    // Run everything in the runtime context
    runtime.block_on(async {
        // Open a throwaway store
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StoreConfig {
            path: dir.path().join("olm_demo.db").to_string_lossy().to_string(),
            ..StoreConfig::default()
        };

        let database = db::connect(&config).await.expect("Failed to open session database");
        let store = OlmSessionStore::new(database, JsonSessionCodec);

        // Persist a session for a remote device
        let session = PickledSession {
            pickle: "TBeZcEZVAfPLpTu3fRWbsAmhEC5ZoXfLrQ".to_string(),
            ratchet_index: 0,
        };
        let device_key = "curve25519:JLAFKJWSCS";

        println!("Storing session sess1 for {}...", device_key);
        store.put("sess1", device_key, &session).await.expect("Failed to store session");

        // Load it back
        let loaded = store.get("sess1", device_key).await
            .expect("Failed to load session")
            .expect("Session should exist");
        println!("Loaded session at ratchet index {}", loaded.ratchet_index);

        // Advance the ratchet and persist again
        let advanced = PickledSession {
            ratchet_index: loaded.ratchet_index + 1,
            ..loaded
        };
        store.put("sess1", device_key, &advanced).await.expect("Failed to store session");

        // List everything known for the device
        let ids = store.session_ids_for_device(device_key).await
            .expect("Failed to list sessions");
        println!("Sessions for {}: {:?}", device_key, ids);

        // Forget the device
        let removed = store.delete_sessions_for_device(device_key).await
            .expect("Failed to delete sessions");
        println!("Removed {} session(s)", removed);
    });
}
