// File: src/error.rs
//! Error types for dictionary maintenance.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our error.
pub type Result<T> = std::result::Result<T, DictError>;

/// Broad error categories, for callers that present errors to a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Encoding,
    Parse,
    Precondition,
    Config,
}

#[derive(Error, Debug)]
pub enum DictError {
    /// File missing, unreadable or unwritable.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    /// The label is known but its output encoding differs (UTF-16, replacement).
    #[error("text encoding '{0}' cannot be used for writing dictionaries")]
    UnsupportedEncoding(String),

    #[error("{}: content is not valid {encoding}", .path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("entry {word:?} cannot be represented in {encoding}")]
    Encode {
        word: String,
        encoding: &'static str,
    },

    #[error("entry {word:?} contains a line break")]
    LineBreak { word: String },

    #[error("{}: header {line:?} is not a word count", .path.display())]
    MalformedHeader { path: PathBuf, line: String },

    /// Malformed or schema-mismatched vocabulary source.
    #[error("{}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("nothing to commit: sanitize has not been run")]
    NotSanitized,

    #[error("settings {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize report: {0}")]
    Report(#[source] serde_json::Error),
}

impl DictError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DictError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        DictError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DictError::Io { .. } => ErrorKind::Io,
            DictError::UnknownEncoding(_)
            | DictError::UnsupportedEncoding(_)
            | DictError::Decode { .. }
            | DictError::Encode { .. }
            | DictError::LineBreak { .. } => ErrorKind::Encoding,
            DictError::MalformedHeader { .. } | DictError::Parse { .. } => ErrorKind::Parse,
            DictError::NotSanitized => ErrorKind::Precondition,
            DictError::Settings { .. } => ErrorKind::Config,
            DictError::Report(_) => ErrorKind::Io,
        }
    }
}
