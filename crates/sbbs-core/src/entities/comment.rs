//! Comment view model - top-level comments and their replies share one shape

use chrono::{DateTime, Utc};

use super::Author;
use crate::value_objects::{EntityId, ReactionState};

/// The comment a reply answers, when it answers another reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub id: EntityId,
    pub username: String,
}

/// A comment or reply as seen by the current viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: EntityId,
    pub post_id: EntityId,
    /// Set on replies
    pub parent_id: Option<EntityId>,
    pub author: Author,
    pub content: String,
    pub reply_count: u32,
    pub reply_to: Option<ReplyTarget>,
    pub created_at: Option<DateTime<Utc>>,
    pub reactions: ReactionState,
    /// Cached replies, owned by this comment in display order
    pub replies: Vec<Comment>,
    pub show_replies: bool,
    pub loading_replies: bool,
}

impl Comment {
    /// Build a just-submitted top-level comment for local display
    pub fn new_local(id: EntityId, post_id: EntityId, author: Author, content: String) -> Self {
        Self {
            id,
            post_id,
            parent_id: None,
            author,
            content,
            reply_count: 0,
            reply_to: None,
            created_at: Some(Utc::now()),
            reactions: ReactionState::default(),
            replies: Vec::new(),
            show_replies: false,
            loading_replies: false,
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
