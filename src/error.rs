use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for textsim operations.
pub type Result<T> = std::result::Result<T, TextSimError>;

/// Error taxonomy of the training/loading pipeline.
///
/// The pipeline is batch-oriented: every variant aborts the current run.
/// There are no retries and no partial-success mode; re-running after the
/// underlying condition is fixed is the recovery path.
#[derive(Error, Debug)]
pub enum TextSimError {
    /// A declared resource (stopword list, corpus directory, model artifact)
    /// could not be opened.
    #[error("resource unavailable: {path}: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document or word-list source could not be read as text.
    #[error("malformed input: {path}: {source}")]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An artifact failed to encode or decode.
    #[error("artifact codec error: {0}")]
    Codec(#[from] serde_cbor::Error),
}

impl TextSimError {
    pub(crate) fn resource(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TextSimError::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TextSimError::MalformedInput {
            path: path.into(),
            source,
        }
    }
}
