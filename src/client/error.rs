//! Client error types

use thiserror::Error;

use crate::api::ApiError;

/// User input rejected before any request is sent
///
/// The display text is the exact message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty date or purpose, or a kilometre field that is not a number
    #[error("Please fill all fields correctly.")]
    IncompleteFields,

    /// End reading below the start reading. Equal readings are accepted
    /// even though the message says "greater than".
    #[error("End Kilometer must be greater than Start Kilometer.")]
    EndBeforeStart,
}

/// Errors that stop a client operation
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Position no longer exists in the freshly fetched list
    #[error("No log entry at position {index} (the log has {len} entries)")]
    NoSuchEntry { index: usize, len: usize },

    #[error("Failed to save report: {0}")]
    Report(#[from] std::io::Error),
}
