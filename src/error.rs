//! Pipeline error taxonomy
//!
//! Every failure in the content pipeline surfaces as one of these variants so
//! the HTTP shell can pick a user-facing status without inspecting strings.
//! The pipeline itself never recovers from an error and never retries.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the content pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// The requested identifier has no backing file
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing file exists but its header or date failed to parse
    #[error("malformed post '{slug}': {reason}")]
    MalformedPost { slug: String, reason: String },

    /// A template failed to compile or to execute against its context
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// A backing directory or file is unreadable for reasons other than absence
    #[error("storage unavailable at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn malformed(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedPost {
            slug: slug.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }

    /// True when the error should map to a "not found" response
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Result alias used throughout the pipeline
pub type Result<T> = std::result::Result<T, Error>;
