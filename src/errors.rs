use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("viewer is not ready: '{operation}' requires a loaded image")]
    NotReady { operation: &'static str },

    #[error("unknown filter '{name}'")]
    UnknownFilter { name: String },

    #[error("invalid arguments for filter '{name}'")]
    InvalidFilterArgs { name: String },

    #[error("unknown easing '{name}'")]
    UnknownEasing { name: String },

    #[error("failed to load image '{path}': {message}")]
    LoadFailure { path: PathBuf, message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("failed to encode snapshot: {message}")]
    Snapshot { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    /// Returns true if the caller can retry after addressing the cause
    /// (e.g. waiting for `on_ready` or re-issuing the load).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ViewerError::NotReady { .. } | ViewerError::LoadFailure { .. } | ViewerError::Io { .. }
        )
    }

    /// Returns an error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewerError::NotReady { .. } => "NOT_READY",
            ViewerError::UnknownFilter { .. } => "UNKNOWN_FILTER",
            ViewerError::InvalidFilterArgs { .. } => "INVALID_FILTER_ARGS",
            ViewerError::UnknownEasing { .. } => "UNKNOWN_EASING",
            ViewerError::LoadFailure { .. } => "LOAD_FAILURE",
            ViewerError::InvalidConfig { .. } => "INVALID_CONFIG",
            ViewerError::Snapshot { .. } => "SNAPSHOT_ERROR",
            ViewerError::Io { .. } => "IO_ERROR",
        }
    }
}
