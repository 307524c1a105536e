//! Envelope `code` values shared by the board backend and its clients

use crate::value_objects::ReactionKind;

/// Business result codes carried in every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    Success,
    InvalidTarget,
    AlreadyLiked,
    NotLiked,
    AlreadyDisliked,
    NotDisliked,
    BadRequest,
    Unauthorized,
    Conflict,
    TooFrequent,
    Internal,
}

impl ResponseCode {
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Success => 200,
            Self::InvalidTarget => 2,
            Self::AlreadyLiked => 3,
            Self::NotLiked => 4,
            Self::AlreadyDisliked => 5,
            Self::NotDisliked => 6,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Conflict => 409,
            Self::TooFrequent => 429,
            Self::Internal => 500,
        }
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        Some(match code {
            200 => Self::Success,
            2 => Self::InvalidTarget,
            3 => Self::AlreadyLiked,
            4 => Self::NotLiked,
            5 => Self::AlreadyDisliked,
            6 => Self::NotDisliked,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            409 => Self::Conflict,
            429 => Self::TooFrequent,
            500 => Self::Internal,
            _ => return None,
        })
    }

    /// Code reported when `kind` is applied twice
    pub const fn already_applied(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => Self::AlreadyLiked,
            ReactionKind::Dislike => Self::AlreadyDisliked,
        }
    }

    /// Code reported when `kind` is cancelled without being applied
    pub const fn not_applied(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => Self::NotLiked,
            ReactionKind::Dislike => Self::NotDisliked,
        }
    }
}
