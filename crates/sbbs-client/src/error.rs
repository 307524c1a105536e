//! Client error types

use sbbs_core::{DomainError, RemoteError, TargetRef};
use thiserror::Error;

/// Errors surfaced by client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// No session; the login prompt has been raised
    #[error("login required")]
    LoginRequired,

    /// The target is not in any loaded collection
    #[error("target {0} is not loaded")]
    TargetNotFound(TargetRef),

    /// A reaction on the same target is still being reconciled
    #[error("a reaction on {0} is still in flight")]
    ReactionInFlight(TargetRef),

    /// Input rejected before any request was made
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The remote call failed
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ClientError {
    /// The remote failure behind this error, if any
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
