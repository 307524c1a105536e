//! Repository traits (ports) for the board backend
//!
//! The domain layer defines what it needs, and the storage layer provides
//! the implementation.

use async_trait::async_trait;

use crate::entities::{StoredComment, StoredPost, UserAccount};
use crate::error::DomainError;
use crate::value_objects::{EntityId, ReactionKind, TargetRef};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Fields of a comment or reply to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: EntityId,
    pub author_id: EntityId,
    pub parent_id: Option<EntityId>,
    pub reply_to_id: Option<EntityId>,
    pub content: String,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<UserAccount>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserAccount>>;

    /// Register an account with an already hashed password
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        avatar: Option<String>,
    ) -> RepoResult<UserAccount>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<StoredPost>>;

    /// Up to `limit` posts, newest first, older than `before` when given
    async fn list_recent(
        &self,
        before: Option<EntityId>,
        limit: usize,
    ) -> RepoResult<Vec<StoredPost>>;

    async fn create(
        &self,
        author_id: EntityId,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> RepoResult<StoredPost>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<StoredComment>>;

    /// Number of top-level comments on a post
    async fn count_top_level(&self, post_id: EntityId) -> RepoResult<u64>;

    /// Top-level comments on a post, oldest first
    async fn list_top_level(
        &self,
        post_id: EntityId,
        offset: usize,
        limit: usize,
    ) -> RepoResult<Vec<StoredComment>>;

    /// Replies under a top-level comment, oldest first
    async fn list_replies(&self, parent_id: EntityId) -> RepoResult<Vec<StoredComment>>;

    /// Store a comment and bump the post's comment count (and the parent's
    /// reply count for replies)
    async fn create(&self, comment: NewComment) -> RepoResult<StoredComment>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// The user's current reaction on a target
    async fn find(&self, user_id: EntityId, target: TargetRef) -> RepoResult<Option<ReactionKind>>;

    /// Replace the user's reaction if it still equals `expected`, moving the
    /// target's counters in the same step. Returns `false` when the stored
    /// reaction no longer matches.
    async fn swap(
        &self,
        user_id: EntityId,
        target: TargetRef,
        expected: Option<ReactionKind>,
        next: Option<ReactionKind>,
    ) -> RepoResult<bool>;
}
