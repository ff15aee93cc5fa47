//! Error types for dataset ingestion and serialization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset or alias file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File does not exist after resolution.
    #[error("file not found: {path}")]
    MissingFile { path: PathBuf },

    /// Failed to read file bytes.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset has no usable header row or is missing the ID column.
    #[error("bad dataset schema in {path}: {reason}")]
    Schema { path: PathBuf, reason: String },

    /// Byte content cannot be decoded under the detected encoding.
    #[error("could not decode {path} as {encoding}")]
    Encoding { path: PathBuf, encoding: String },

    /// Malformed delimited content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Errors that can occur while writing the dataset or alias file back out.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// No records remain, so no header can be derived.
    #[error("dataset is empty, nothing to serialize")]
    EmptyDataset,

    /// Failed to render delimited content.
    #[error("failed to render CSV: {message}")]
    CsvWrite { message: String },

    /// Failed to write file bytes.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::MissingFile {
            path: PathBuf::from("data/results.csv"),
        };
        assert_eq!(err.to_string(), "file not found: data/results.csv");

        let err = SerializeError::EmptyDataset;
        assert_eq!(err.to_string(), "dataset is empty, nothing to serialize");
    }
}
