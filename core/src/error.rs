//! Error types for the todo core.
//!
//! # Design
//! `InvalidTodoId` is its own type so a malformed identifier can never be
//! confused with a well-formed one that matches nothing. `TodoError` is what
//! the gateway returns; `StoreError` is what a store adapter returns and is
//! carried through unchanged.

use thiserror::Error;

/// A string that is not a todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid ID")]
pub struct InvalidTodoId;

/// Failures reported by a `TodoStore` adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver or backend failed to perform the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored document could not be mapped to a todo.
    #[error("corrupt document: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Errors returned by `TodoGateway` operations.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    InvalidId(#[from] InvalidTodoId),

    /// The update payload carried no field to change.
    #[error("No fields to update")]
    EmptyUpdate,

    #[error("Todo not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}
