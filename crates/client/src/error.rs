//! Client error types.

use situps_core::protocol::ProtocolError;
use situps_core::ScheduleDateError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Request for {key} timed out after {timeout_ms}ms")]
    Timeout { key: String, timeout_ms: u64 },

    #[error("Request for {key} was superseded by a newer request")]
    Superseded { key: String },

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Invalid date: {0}")]
    Date(#[from] ScheduleDateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
