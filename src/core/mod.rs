//! Core types shared by every cljdeps module: the error enum, the user-facing
//! error rendering, and path-aware IO errors.

pub mod error;
pub mod file_error;

pub use error::{CljdepsError, ErrorContext, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
