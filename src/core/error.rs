use std::collections::TryReserveError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvcError {
    #[error("{op} '{}' failed: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),
    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<SvcError>,
    },
    #[error("invalid service name '{0}'")]
    InvalidName(String),
    #[error("{0}")]
    Precondition(String),
}

impl SvcError {
    pub fn io(op: &'static str, path: impl AsRef<Path>, source: impl Into<io::Error>) -> Self {
        SvcError::Io {
            op,
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Underlying `io::Error` at the bottom of the context chain, if any.
    pub fn io_source(&self) -> Option<&io::Error> {
        match self {
            SvcError::Io { source, .. } => Some(source),
            SvcError::Context { source, .. } => source.io_source(),
            _ => None,
        }
    }

    /// Renders the error and all of its causes as `outer: inner: ...`.
    pub fn chain(&self) -> String {
        match self {
            SvcError::Context { context, source } => format!("{}: {}", context, source.chain()),
            other => other.to_string(),
        }
    }
}

/// Wraps an error with a description of the step that failed.
pub trait ErrorContext<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T, SvcError>;

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T, SvcError>;
}

impl<T, E: Into<SvcError>> ErrorContext<T> for Result<T, E> {
    fn context<C: Into<String>>(self, context: C) -> Result<T, SvcError> {
        self.map_err(|e| SvcError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T, SvcError> {
        self.map_err(|e| SvcError::Context {
            context: f().into(),
            source: Box::new(e.into()),
        })
    }
}
