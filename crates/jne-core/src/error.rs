//! Error types for path resolution, mutation and document storage.

use crate::path::Path;
use serde_json::Value;
use thiserror::Error;

pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Error)]
pub enum EditError {
    /// Nothing exists at the path, or the walk hit an incompatible value.
    #[error("path not found: {path}")]
    NotFound { path: Path },

    /// A strict write met a value that cannot hold the next segment.
    #[error("type conflict at {path}: expected {expected}, found {found}")]
    TypeConflict {
        path: Path,
        expected: &'static str,
        found: &'static str,
    },

    /// Reaching the index would pad the array at `path` with too many nulls.
    #[error("index {index} is too far past the end of the array at {path} (len: {len})")]
    IndexOutOfRange { path: Path, index: usize, len: usize },

    /// Text that was supposed to be JSON did not parse.
    #[error("malformed JSON input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("malformed path {input:?}: {reason}")]
    MalformedPath { input: String, reason: String },

    /// The document moved on since the caller read it.
    #[error("stale revision: expected {expected}, document is at {actual}")]
    StaleRevision { expected: u64, actual: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditError {
    pub fn not_found(path: Path) -> Self {
        EditError::NotFound { path }
    }

    pub fn type_conflict(path: Path, expected: &'static str, found: &Value) -> Self {
        EditError::TypeConflict {
            path,
            expected,
            found: value_type_name(found),
        }
    }

    pub fn malformed_path(input: impl Into<String>, reason: impl Into<String>) -> Self {
        EditError::MalformedPath {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
