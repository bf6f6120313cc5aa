use std::path::{Path, PathBuf};

/// Error type returned by hanseg public APIs.
#[derive(Debug, thiserror::Error)]
pub enum HansegError {
    /// Dictionary directory is missing or one of its files is malformed.
    ///
    /// Raised only while constructing an [`crate::Engine`]; the engine is not
    /// usable afterwards.
    #[error("failed to load dictionary at {}: {message}", path.display())]
    DictionaryLoad {
        /// File or directory that could not be loaded.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
    /// Call arguments were rejected before any processing happened.
    #[error("invalid argument: {0}")]
    Validation(String),
    /// The lattice has no path from BOS to EOS.
    ///
    /// Unknown-character fallback entries make this unreachable for a
    /// well-formed dictionary, so it points at a dictionary bug.
    #[error("no path through lattice: offset {offset} is unreachable in {input:?}")]
    NoPath {
        /// First character offset that no path reaches.
        offset: usize,
        /// Input being analyzed.
        input: String,
    },
}

impl HansegError {
    pub(crate) fn dictionary_load(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        HansegError::DictionaryLoad {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        HansegError::Validation(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HansegError>;
