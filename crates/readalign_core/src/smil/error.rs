//! Media overlay codec error types.

use std::path::PathBuf;

/// Errors that can occur while encoding or decoding overlay documents.
#[derive(Debug, thiserror::Error)]
pub enum SmilError {
    /// Failed to read an overlay file.
    #[error("Failed to read file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write an overlay file.
    #[error("Failed to write file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document's structure does not match the expected schema.
    #[error("Malformed overlay document: {0}")]
    MalformedDocument(String),
}

impl SmilError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }
}

/// Type alias for codec results.
pub type SmilResult<T> = Result<T, SmilError>;
