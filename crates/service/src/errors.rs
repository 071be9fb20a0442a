use thiserror::Error;

/// Failure kinds the storage layer can surface. Absence of a post is not an
/// error; lookups report it as `None`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O level: the data file cannot be opened, read, or written
    /// (missing mid-operation, permission denied, disk full), or the input
    /// collection cannot be serialized on save.
    #[error("data file error: {0}")]
    DataFile(String),
    /// Content level: malformed JSON, wrong top-level shape, or a record
    /// without a well-formed `id` field.
    #[error("data format error: {0}")]
    DataFormat(String),
}
