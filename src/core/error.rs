//! Error handling for cljdeps
//!
//! This module provides the strongly-typed error enum used across the crate and
//! the user-facing rendering used by the CLI. The system follows two rules:
//! 1. **Strongly-typed errors** for the few failures callers must react to
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! Most of the resolution pipeline is best-effort and never surfaces an error:
//! unparseable lines, missing jars and failing build tools are logged and
//! skipped. The variants below cover what remains: refusing overlapping runs,
//! unusable configuration, and cache IO that the CLI reports explicitly.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cljdeps_cli::core::{CljdepsError, ErrorContext, user_friendly_error};
//!
//! let ctx = user_friendly_error(anyhow::Error::from(CljdepsError::ResolutionInProgress));
//! ctx.display(); // Shows colored error with suggestions
//!
//! let manual = ErrorContext::new(CljdepsError::NoManifestFiles)
//!     .with_suggestion("Run the command from a directory containing project.clj")
//!     .with_details("cljdeps recognizes project.clj and build.boot");
//! println!("{manual}");
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for cljdeps operations.
///
/// Each variant carries the data needed to explain the failure; the mapping to
/// suggestions lives in [`user_friendly_error`].
#[derive(Error, Debug)]
pub enum CljdepsError {
    /// A resolution run is already in flight for this project
    #[error("A dependency resolution is already running for this project")]
    ResolutionInProgress,

    /// The selection or project contains no recognized manifest file
    #[error("No project.clj or build.boot files found")]
    NoManifestFiles,

    /// The build tool executable could not be started
    #[error("Failed to launch '{command}' in {work_dir}")]
    ToolLaunchFailed {
        /// Full command line that was attempted
        command: String,
        /// Working directory of the attempt
        work_dir: String,
        /// Underlying launch failure
        reason: String,
    },

    /// The dependency cache exists but could not be read
    #[error("Failed to read dependency cache {path}")]
    CacheReadFailed {
        /// Cache file location
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// The dependency cache could not be written
    #[error("Failed to write dependency cache {path}")]
    CacheWriteFailed {
        /// Cache file location
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// A jar exists but could not be opened as an archive
    #[error("Failed to open archive {path}: {reason}")]
    ArchiveOpenFailed {
        /// Jar location
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Configuration file problems
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for CljdepsError {
    fn clone(&self) -> Self {
        match self {
            Self::ResolutionInProgress => Self::ResolutionInProgress,
            Self::NoManifestFiles => Self::NoManifestFiles,
            Self::ToolLaunchFailed {
                command,
                work_dir,
                reason,
            } => Self::ToolLaunchFailed {
                command: command.clone(),
                work_dir: work_dir.clone(),
                reason: reason.clone(),
            },
            Self::CacheReadFailed {
                path,
                reason,
            } => Self::CacheReadFailed {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::CacheWriteFailed {
                path,
                reason,
            } => Self::CacheWriteFailed {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::ArchiveOpenFailed {
                path,
                reason,
            } => Self::ArchiveOpenFailed {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error is not Clone, keep the message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper carrying an optional suggestion and details for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CljdepsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: CljdepsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error (printed in green).
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error (printed in yellow).
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions where known.
///
/// Typed [`CljdepsError`]s anywhere in the chain are matched first, then common
/// IO and TOML failures. Anything else is rendered with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(err) = error.chain().find_map(|e| e.downcast_ref::<CljdepsError>()) {
        return create_error_context(err.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CljdepsError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check ownership of the cache directory and the project files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CljdepsError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(CljdepsError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your cljdeps config.toml");
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CljdepsError::Other {
        message,
    })
}

fn create_error_context(error: CljdepsError) -> ErrorContext {
    match &error {
        CljdepsError::ResolutionInProgress => ErrorContext::new(error)
            .with_suggestion("Wait for the running sync to finish, then try again")
            .with_details("Only one resolution run per project may be in flight"),
        CljdepsError::NoManifestFiles => ErrorContext::new(error)
            .with_suggestion("Pass a project.clj or build.boot path, or use --project-dir")
            .with_details("Only files named project.clj (Leiningen) or build.boot (Boot) are synced"),
        CljdepsError::ToolLaunchFailed {
            reason, ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Make sure lein or boot is installed and on your PATH, or set [tools] in config.toml")
                .with_details(details)
        }
        CljdepsError::CacheReadFailed {
            reason, ..
        }
        | CljdepsError::CacheWriteFailed {
            reason, ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Run 'cljdeps cache clear' and sync again, or set CLJDEPS_CACHE_DIR")
                .with_details(details)
        }
        CljdepsError::ArchiveOpenFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("The jar may be corrupt; delete it and run the build tool to download it again"),
        CljdepsError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check ~/.cljdeps/config.toml or the file passed with --config"),
        _ => ErrorContext::new(error),
    }
}
