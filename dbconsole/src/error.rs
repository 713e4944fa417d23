//! Error types for the database console
//!
//! All errors use thiserror for structured error handling.
//! The controller turns every one of them into a single log panel entry.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Connection rejected: {0}")]
    ConnectionRejected(String),

    #[error("Cannot {action} while {status}")]
    InvalidState {
        action: &'static str,
        status: crate::database::ConnectionStatus,
    },

    #[error("No active connection")]
    NoActiveConnection,

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("No record with phone {0}, 0 removed")]
    NothingDeleted(String),

    #[error("A record with phone {0} already exists")]
    DuplicateRecord(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
