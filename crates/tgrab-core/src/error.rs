//! Error types for attachment retrieval and archive explosion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ExplodeError`].
pub type Result<T> = std::result::Result<T, ExplodeError>;

/// Errors that can occur while exploding a single archive.
///
/// Every variant is contained by the explode driver: a failure aborts the
/// offending archive only and is surfaced as a report warning, never as a
/// panic or a batch-level failure.
#[derive(Error, Debug)]
pub enum ExplodeError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Filename carries no recognized archive suffix.
    ///
    /// This is a signal to skip the file, not a failure.
    #[error("not a supported archive")]
    UnsupportedFormat,

    /// Archive exists but cannot be parsed.
    #[error("corrupt archive {path}: {reason}")]
    CorruptArchive {
        /// The archive that failed to open or parse.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// I/O error while writing extracted content.
    #[error("failed to extract {path}: {source}")]
    ExtractFailure {
        /// The archive being extracted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Filesystem move/rename failed during normalization.
    ///
    /// Results already written stay in place; there is no rollback.
    #[error("failed to arrange {from} into {to}: {source}")]
    ArrangeFailure {
        /// Scratch path being relocated.
        from: PathBuf,
        /// Intended final path.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Nested archives exceed the configured recursion depth.
    #[error("recursion depth limit ({limit}) reached at {path}")]
    DepthLimit {
        /// The archive that was not descended into.
        path: PathBuf,
        /// The configured limit.
        limit: usize,
    },
}

/// Errors that can occur at the helpdesk API boundary.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Api {
        /// The request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Attachment filename is not a plain file name.
    #[error("unsafe attachment name: {name:?}")]
    UnsafeAttachmentName {
        /// The offending name as reported by the API.
        name: String,
    },

    /// Local I/O failure while writing a downloaded attachment.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured helpdesk URL cannot be parsed.
    #[error("invalid helpdesk URL {url:?}: {reason}")]
    InvalidUrl {
        /// The configured URL.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },
}
