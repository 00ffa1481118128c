use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] surrealdb::Error),

    #[error("Corrupt session record {primary_key}: {message}")]
    CorruptRecord { primary_key: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True when a stored blob could not be turned back into a session.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::CorruptRecord { .. })
    }

    /// True when a key component failed the non-empty / no-separator check.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }
}
