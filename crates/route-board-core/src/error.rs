//! Board Errors

use thiserror::Error;

use crate::route::{RouteId, Status};

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Locally recovered board inconsistencies.
///
/// None of these reach the user; they are logged and the board is left as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A move named a source column that does not hold the route
    #[error("route {route} is not in column {column}")]
    NotInColumn { route: RouteId, column: Status },

    /// A gesture referenced a card the board does not show
    #[error("route {route} is not on the board")]
    NotOnBoard { route: RouteId },

    /// A transition whose target is the column the route already sits in
    #[error("route {route} is already in column {column}")]
    NoChange { route: RouteId, column: Status },
}

/// Why a remote status update did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct UpdateError {
    pub reason: String,
}

impl UpdateError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
