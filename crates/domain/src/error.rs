//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The file exceeds the upload size limit.
    #[error("file is {size} bytes, which exceeds the {limit} byte upload limit")]
    FileTooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// The configured limit in bytes.
        limit: u64,
    },

    /// The file's content type is not accepted for upload.
    #[error("unsupported file type: {0}; upload a PDF, DOC, or DOCX file")]
    UnsupportedFileType(String),

    /// A file name is missing or empty.
    #[error("file name is empty")]
    EmptyFileName,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
