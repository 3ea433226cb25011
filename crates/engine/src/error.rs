//! The module contains the errors the engine can throw.
//!
//! Every public operation reports one of:
//!
//! - [`InvalidState`] when a record is not in the status the operation needs.
//! - [`InvalidArgument`] when the caller passed something unusable.
//! - [`Conflict`] when a record changed between read and commit.
//! - [`NotFound`] when a row does not exist or is outside the caller's scope.
//!
//! [`InvalidState`]: EngineError::InvalidState
//! [`InvalidArgument`]: EngineError::InvalidArgument
//! [`Conflict`]: EngineError::Conflict
//! [`NotFound`]: EngineError::NotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidState(a), Self::InvalidState(b)) => a == b,
            (Self::InvalidArgument(a), Self::InvalidArgument(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
