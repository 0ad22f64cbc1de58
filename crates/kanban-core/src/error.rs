use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("No board is selected")]
    NoBoardSelected,

    #[error("No authenticated user")]
    Unauthenticated,

    #[error("Remote rejected request: {0}")]
    Remote(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KanbanError {
    /// Precondition failures are raised before any remote call is made.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoBoardSelected | Self::Unauthenticated)
    }
}
