//! Error types for the agent transport

use thiserror::Error;

/// Agent transport error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Transport(String),
}

/// Result type alias for transport operations
pub type Result<T> = std::result::Result<T, AgentError>;
