//! Errors produced at the network boundary, after the envelope is decoded

use thiserror::Error;

use super::ResponseCode;
use crate::value_objects::ReactionKind;

/// Result of a call through [`crate::traits::CommunityApi`]
pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The server already holds this reaction for the viewer
    #[error("already {0}d on the server")]
    AlreadyApplied(ReactionKind),

    /// The server holds no such reaction to cancel
    #[error("no {0} to cancel on the server")]
    NotApplied(ReactionKind),

    #[error("not authenticated")]
    Unauthorized,

    #[error("too many requests: {0}")]
    Throttled(String),

    #[error("request challenge not passed")]
    ChallengeFailed,

    #[error("server rejected request ({code}): {message}")]
    Rejected { code: i32, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("request timed out")]
    TimedOut,
}

impl RemoteError {
    /// Map a non-success envelope to its error
    pub fn from_envelope(code: i32, message: Option<String>) -> Self {
        let message = message.unwrap_or_default();
        match ResponseCode::from_i32(code) {
            Some(ResponseCode::AlreadyLiked) => Self::AlreadyApplied(ReactionKind::Like),
            Some(ResponseCode::AlreadyDisliked) => Self::AlreadyApplied(ReactionKind::Dislike),
            Some(ResponseCode::NotLiked) => Self::NotApplied(ReactionKind::Like),
            Some(ResponseCode::NotDisliked) => Self::NotApplied(ReactionKind::Dislike),
            Some(ResponseCode::Unauthorized) => Self::Unauthorized,
            Some(ResponseCode::TooFrequent) => Self::Throttled(message),
            _ => Self::Rejected { code, message },
        }
    }

    /// Whether the server reported `kind` as already applied
    pub fn is_already_applied(&self, kind: ReactionKind) -> bool {
        matches!(self, Self::AlreadyApplied(k) if *k == kind)
    }

    /// Whether the server reported `kind` as not applied
    pub fn is_not_applied(&self, kind: ReactionKind) -> bool {
        matches!(self, Self::NotApplied(k) if *k == kind)
    }

    /// Server-provided message, if the server produced one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } | Self::Throttled(message) if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}
