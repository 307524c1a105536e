//! Stored board records - what the backend persists, independent of any viewer

use chrono::{DateTime, Utc};

use crate::value_objects::{EntityId, ReactionKind};

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: EntityId,
    pub username: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPost {
    pub id: EntityId,
    pub author_id: EntityId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub like_count: u32,
    pub dislike_count: u32,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredComment {
    pub id: EntityId,
    pub post_id: EntityId,
    pub author_id: EntityId,
    pub parent_id: Option<EntityId>,
    pub reply_to_id: Option<EntityId>,
    pub content: String,
    pub like_count: u32,
    pub dislike_count: u32,
    pub reply_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Counter pair carried by every reactable record
pub trait ReactionCounters {
    fn counter_mut(&mut self, kind: ReactionKind) -> &mut u32;

    /// Move the counters from `previous` to `next`
    fn shift_reaction(&mut self, previous: Option<ReactionKind>, next: Option<ReactionKind>) {
        if previous == next {
            return;
        }
        if let Some(kind) = previous {
            let counter = self.counter_mut(kind);
            *counter = counter.saturating_sub(1);
        }
        if let Some(kind) = next {
            let counter = self.counter_mut(kind);
            *counter = counter.saturating_add(1);
        }
    }
}

impl ReactionCounters for StoredPost {
    fn counter_mut(&mut self, kind: ReactionKind) -> &mut u32 {
        match kind {
            ReactionKind::Like => &mut self.like_count,
            ReactionKind::Dislike => &mut self.dislike_count,
        }
    }
}

impl ReactionCounters for StoredComment {
    fn counter_mut(&mut self, kind: ReactionKind) -> &mut u32 {
        match kind {
            ReactionKind::Like => &mut self.like_count,
            ReactionKind::Dislike => &mut self.dislike_count,
        }
    }
}
