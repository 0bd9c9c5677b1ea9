use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors surfaced by the storage layer.
///
/// `AliasExists` is the one expected business condition and is classified
/// from the backend's structured constraint-violation signal, never from
/// message text. Everything else collapses into `Connection` (establishment
/// failures) or `Persistence` (failures of an individual operation, tagged
/// with the operation's identity).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("alias already exists: {0}")]
    AliasExists(String),
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("storage operation {op} failed: {message}")]
    Persistence { op: &'static str, message: String },
}

impl StorageError {
    /// Wraps an arbitrary backend failure with the identity of the
    /// operation that produced it.
    pub fn persistence(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Persistence {
            op,
            message: err.to_string(),
        }
    }

    /// Returns `true` when the error is the duplicate-alias condition,
    /// which callers may recover from (e.g. by picking another alias).
    pub fn is_alias_exists(&self) -> bool {
        matches!(self, Self::AliasExists(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_carries_operation_identity() {
        let err = StorageError::persistence("storage.postgres.save_url", "boom");
        assert_eq!(
            err.to_string(),
            "storage operation storage.postgres.save_url failed: boom"
        );
    }

    #[test]
    fn alias_exists_is_distinguishable() {
        assert!(StorageError::AliasExists("google".to_string()).is_alias_exists());
        assert!(!StorageError::Connection("refused".to_string()).is_alias_exists());
    }
}
