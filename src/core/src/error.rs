//! Unified error types for the sqlgate platform
//!
//! This module provides a central error type that can be converted from
//! any of the subsystem-specific error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the sqlgate platform
#[derive(Debug, Error)]
pub enum CoreError {
    /// Role-policy errors (hierarchy construction, closure generation)
    #[error("Policy error: {0}")]
    Policy(String),

    /// Transaction lifecycle errors
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Framing/protocol errors between controller and executor
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// SQL engine errors surfaced by the executor
    #[error("Engine error: {0}")]
    Engine(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input/state
    #[error("Invalid: {0}")]
    Invalid(String),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for uncategorized cases
    #[error("Error: {0}")]
    Generic(String),
}

impl CoreError {
    /// Create a policy error
    pub fn policy<S: Into<String>>(msg: S) -> Self {
        CoreError::Policy(msg.into())
    }

    /// Create a transaction error
    pub fn transaction<S: Into<String>>(msg: S) -> Self {
        CoreError::Transaction(msg.into())
    }

    /// Create a protocol error
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        CoreError::Protocol(msg.into())
    }

    /// Create an engine error
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        CoreError::Engine(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CoreError::NotFound(msg.into())
    }

    /// Create an invalid error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }

    /// Create a generic error
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        CoreError::Generic(msg.into())
    }
}
