//! Error types for storyvoice

use std::fmt;
use thiserror::Error;

/// Main error type for storyvoice
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Synthesis service error: {0}")]
    Collaborator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Task error: {0}")]
    Task(String),

    /// A failure raised while processing one chunk, tagged with its index.
    #[error("chunk {index} failed ({kind}): {source}", kind = .source.kind())]
    Chunk {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

/// Result type for storyvoice operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used when reporting an aborted run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    CollaboratorFailure,
    IoFailure,
    Configuration,
    Internal,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "EmptyInput",
            ErrorKind::CollaboratorFailure => "CollaboratorFailure",
            ErrorKind::IoFailure => "IOFailure",
            ErrorKind::Configuration => "Configuration",
            ErrorKind::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Error {
    /// Tag an error with the index of the chunk it belongs to
    pub fn for_chunk(index: usize, err: Error) -> Self {
        match err {
            // Already tagged; keep the innermost index.
            Error::Chunk { .. } => err,
            other => Error::Chunk {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Classify the error, looking through chunk tags
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput(_) => ErrorKind::EmptyInput,
            Error::Collaborator(_) => ErrorKind::CollaboratorFailure,
            Error::Io(_) | Error::FileNotFound(_) => ErrorKind::IoFailure,
            Error::Config(_) => ErrorKind::Configuration,
            Error::Task(_) => ErrorKind::Internal,
            Error::Chunk { source, .. } => source.kind(),
        }
    }

    /// Index of the chunk that caused the error, if any
    pub fn chunk_index(&self) -> Option<usize> {
        match self {
            Error::Chunk { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Collaborator(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}
