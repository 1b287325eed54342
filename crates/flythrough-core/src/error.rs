//! Error types for flythrough.

use thiserror::Error;

/// The main error type for flythrough operations.
///
/// Everything except I/O and event loop failures is a configuration error
/// raised while building a scene. Per-frame updates never fail.
#[derive(Error, Debug)]
pub enum FlythroughError {
    /// The marker count must be at least one.
    #[error("invalid marker count {0}: at least one marker is required")]
    InvalidMarkerCount(usize),

    /// The marker size must be a positive finite number.
    #[error("invalid marker size {0}: must be positive and finite")]
    InvalidMarkerSize(f32),

    /// The path control points cannot form a closed curve.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// An option is outside its valid range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The window event loop failed.
    #[error("event loop error: {0}")]
    EventLoop(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FlythroughError {
    /// Returns true for errors caused by invalid scene configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMarkerCount(_)
                | Self::InvalidMarkerSize(_)
                | Self::MalformedPath(_)
                | Self::InvalidOption(_)
        )
    }
}

/// A specialized Result type for flythrough operations.
pub type Result<T> = std::result::Result<T, FlythroughError>;
