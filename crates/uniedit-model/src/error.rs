//! Error types for record-store mutations.

use thiserror::Error;

/// Errors that can occur when mutating the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record ID is not present in the loaded dataset.
    #[error("record ID {id} does not exist")]
    RecordNotFound { id: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::RecordNotFound {
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "record ID 42 does not exist");
    }
}
