//! Error types for the generation pipeline

use std::path::PathBuf;

/// A raw name that cannot become a declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// No ASCII letters or digits survive normalization
    #[error("'{raw}' does not produce a usable identifier")]
    Empty { raw: String },

    /// Two distinct raw names normalize to the same identifier
    #[error("'{raw}' and '{existing}' both normalize to '{identifier}'")]
    Collision {
        raw: String,
        existing: String,
        identifier: String,
    },
}

/// A metadata or template provider that could not deliver.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{what} unavailable at {}: {source}", path.display())]
    Unavailable {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{what} at {} is malformed: {reason}", path.display())]
    Malformed {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },
}

/// Error type for a single artifact or a whole run.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to render artifact: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Another generation run holds {}", lock_path.display())]
    RunInProgress { lock_path: PathBuf },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}
