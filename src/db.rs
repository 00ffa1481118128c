use crate::config::StoreConfig;
use crate::store::StoreError;
use surrealdb::engine::any::{self, Any};
use surrealdb::Surreal;
use tracing::info;

/// Open the file-backed session database and prepare its schema.
pub async fn connect(config: &StoreConfig) -> Result<Surreal<Any>, StoreError> {
    config.ensure_db_dir()?;

    info!("Connecting to session database at {}", config.path);
    let db = any::connect(format!("surrealkv://{}", config.path)).await?;
    db.use_ns(&config.namespace).use_db(&config.database).await?;

    define_tables(&db).await?;

    Ok(db)
}

/// Open an in-memory session database, for tests and ephemeral stores.
pub async fn connect_memory() -> Result<Surreal<Any>, StoreError> {
    let db = any::connect("mem://").await?;
    db.use_ns("olmstore").use_db("crypto").await?;

    define_tables(&db).await?;

    Ok(db)
}

/// Create the olm_session table, fields and indexes. Idempotent.
pub async fn define_tables(db: &Surreal<Any>) -> Result<(), StoreError> {
    info!("Defining olm_session table");
    db.query(
        "
        DEFINE TABLE IF NOT EXISTS olm_session TYPE NORMAL SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS primary_key ON olm_session TYPE string ASSERT $value != NONE;
        DEFINE FIELD IF NOT EXISTS session_id ON olm_session TYPE string ASSERT $value != NONE;
        DEFINE FIELD IF NOT EXISTS device_key ON olm_session TYPE string ASSERT $value != NONE;
        DEFINE FIELD IF NOT EXISTS session_blob ON olm_session TYPE string;
        DEFINE FIELD IF NOT EXISTS created_at ON olm_session TYPE datetime;
        DEFINE FIELD IF NOT EXISTS updated_at ON olm_session TYPE datetime;
        DEFINE INDEX IF NOT EXISTS olm_session_primary ON olm_session COLUMNS primary_key UNIQUE;
        DEFINE INDEX IF NOT EXISTS olm_session_device ON olm_session COLUMNS device_key;
    ",
    )
    .await?
    .check()?;

    Ok(())
}
