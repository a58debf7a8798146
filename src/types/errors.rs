use serde::Serialize;
use thiserror::Error;

/// Errors that cross the ingestion boundary.
///
/// Only input-level failures live here. Unreadable entries, invalid JSON and
/// unexpected document shapes degrade into empty report sections instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Ingestion cancelled")]
    Cancelled,
}

impl From<std::io::Error> for IngestError {
    fn from(error: std::io::Error) -> Self {
        IngestError::Io(error.to_string())
    }
}

impl From<zip::result::ZipError> for IngestError {
    fn from(error: zip::result::ZipError) -> Self {
        IngestError::Archive(error.to_string())
    }
}

impl Serialize for IngestError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type IngestResult<T> = Result<T, IngestError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
