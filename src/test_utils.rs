use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use thiserror::Error;
use uuid::Uuid;

use crate::db;

#[derive(Error, Debug)]
pub enum TestUtilsError {
    #[error("Database connection failed: {0}")]
    DatabaseConnection(#[from] surrealdb::Error),

    #[error("Schema initialization failed: {message}")]
    SchemaInitialization { message: String },
}

/// Create an isolated in-memory database with the session schema applied.
///
/// Each call gets a unique namespace and database name, so tests sharing a
/// process cannot observe each other's records.
pub async fn create_test_db() -> Result<Surreal<Any>, TestUtilsError> {
    let database_name = format!("test_db_{}", Uuid::new_v4().simple());
    let namespace = format!("test_ns_{}", Uuid::new_v4().simple());

    let db = surrealdb::engine::any::connect("mem://")
        .await
        .map_err(TestUtilsError::DatabaseConnection)?;

    db.use_ns(&namespace)
        .use_db(&database_name)
        .await
        .map_err(TestUtilsError::DatabaseConnection)?;

    db::define_tables(&db)
        .await
        .map_err(|e| TestUtilsError::SchemaInitialization {
            message: e.to_string(),
        })?;

    Ok(db)
}
