use std::path::Path;
use tracing::debug;

/// Database configuration for the session store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SurrealKV database file
    pub path: String,

    /// Namespace to use
    pub namespace: String,

    /// Database to use
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let db_path = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("./"))
            .join("olmstore")
            .join("olmstore.db")
            .to_string_lossy()
            .to_string();

        Self {
            path: db_path,
            namespace: "olmstore".to_string(),
            database: "crypto".to_string(),
        }
    }
}

impl StoreConfig {
    /// Ensures the database directory exists
    pub fn ensure_db_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            debug!("Ensuring database directory exists: {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
