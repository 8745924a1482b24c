//! Path-aware IO errors.
//!
//! `std::io::Error` does not carry the path it failed on. [`FileResultExt`]
//! attaches the operation, the path and the purpose so cache and config failures
//! say which file was involved.

use std::path::PathBuf;
use thiserror::Error;

/// The kind of filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Read,
    Write,
    CreateDir,
    Remove,
    Lock,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::CreateDir => write!(f, "creating directory"),
            FileOperation::Remove => write!(f, "removing"),
            FileOperation::Lock => write!(f, "locking"),
        }
    }
}

/// An IO failure annotated with the file and purpose of the operation.
#[derive(Error, Debug)]
#[error("Failed {operation} {} ({purpose})", file_path.display())]
pub struct FileOperationError {
    pub operation: FileOperation,
    pub file_path: PathBuf,
    pub purpose: String,
    #[source]
    pub source: std::io::Error,
}

impl FileOperationError {
    /// True when the underlying error is `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}

/// Extension trait adding file context to `io::Result`.
pub trait FileResultExt<T> {
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
    ) -> Result<T, FileOperationError>;
}

impl<T> FileResultExt<T> for Result<T, std::io::Error> {
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
    ) -> Result<T, FileOperationError> {
        self.map_err(|source| FileOperationError {
            operation,
            file_path: file_path.into(),
            purpose: purpose.into(),
            source,
        })
    }
}
