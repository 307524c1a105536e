//! Domain errors - error types for the domain layer

use thiserror::Error;

use super::ResponseCode;
use crate::value_objects::{EntityId, ReactionKind};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(EntityId),

    #[error("Post not found: {0}")]
    PostNotFound(EntityId),

    #[error("Comment not found: {0}")]
    CommentNotFound(EntityId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Reply parent {parent} does not belong to post {post}")]
    ReplyOutsidePost { parent: EntityId, post: EntityId },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already {0}d")]
    AlreadyReacted(ReactionKind),

    #[error("Not {0}d yet")]
    NotReacted(ReactionKind),

    #[error("Reaction changed concurrently")]
    ReactionRaced,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::ReplyOutsidePost { .. } => "REPLY_OUTSIDE_POST",

            Self::AlreadyReacted(ReactionKind::Like) => "ALREADY_LIKED",
            Self::AlreadyReacted(ReactionKind::Dislike) => "ALREADY_DISLIKED",
            Self::NotReacted(ReactionKind::Like) => "NOT_LIKED",
            Self::NotReacted(ReactionKind::Dislike) => "NOT_DISLIKED",
            Self::ReactionRaced => "REACTION_RACED",

            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Envelope code for this error
    pub fn response_code(&self) -> ResponseCode {
        match self {
            Self::UserNotFound(_) | Self::PostNotFound(_) | Self::CommentNotFound(_) => {
                ResponseCode::InvalidTarget
            }
            Self::ValidationError(_)
            | Self::EmptyContent
            | Self::ContentTooLong { .. }
            | Self::ReplyOutsidePost { .. } => ResponseCode::BadRequest,
            Self::AlreadyReacted(kind) => ResponseCode::already_applied(*kind),
            Self::NotReacted(kind) => ResponseCode::not_applied(*kind),
            Self::ReactionRaced => ResponseCode::Conflict,
            Self::StorageError(_) | Self::InternalError(_) => ResponseCode::Internal,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::PostNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyContent
                | Self::ContentTooLong { .. }
                | Self::ReplyOutsidePost { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyReacted(_) | Self::NotReacted(_) | Self::ReactionRaced
        )
    }
}
