//! Pipeline error types.
//!
//! Compile errors inside a unit are [`Diagnostic`](crate::Diagnostic)s and
//! never abort a build; a [`PipelineError`] is a failure around compilation
//! (reading units, loading configuration, writing output).

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl PipelineError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Pipeline result type alias.
pub type PipelineResult<T> = Result<T, PipelineError>;
