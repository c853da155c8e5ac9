//! Error types for MatView.

use thiserror::Error;

/// Main error type for MatView operations.
///
/// No variant is fatal to the host process; the worst outcome of any engine
/// error is a frozen overlay while playback continues underneath.
#[derive(Error, Debug)]
pub enum MatViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Player command failed: {0}")]
    PlayerCommand(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Timer callback error: {0}")]
    TimerCallback(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No player attached")]
    NotAttached,
}

/// Result type alias for MatView operations.
pub type Result<T> = std::result::Result<T, MatViewError>;
