//! Port to the remote board API, as seen by the client

use async_trait::async_trait;

use crate::dto::{
    Ack, CommentDto, CommentLocationDto, CommentPageDto, CreateCommentRequest, LoginRequest,
    LoginResponseDto, PostDetailDto, PostListDto,
};
use crate::error::RemoteResult;
use crate::value_objects::{EntityId, ReactionKind, TargetRef};

/// Remote operations used by the client. Implementations decode the
/// response envelope once and report every non-success as a
/// [`crate::error::RemoteError`].
#[async_trait]
pub trait CommunityApi: Send + Sync {
    /// Apply `kind` to the target
    async fn react(&self, target: TargetRef, kind: ReactionKind) -> RemoteResult<Ack>;

    /// Cancel `kind` on the target
    async fn cancel_reaction(&self, target: TargetRef, kind: ReactionKind) -> RemoteResult<Ack>;

    /// One page of top-level comments
    async fn fetch_comments(
        &self,
        post_id: EntityId,
        page: u32,
        page_size: u32,
    ) -> RemoteResult<CommentPageDto>;

    async fn fetch_replies(&self, comment_id: EntityId) -> RemoteResult<Vec<CommentDto>>;

    /// Create a comment or reply. Top-level comments report where they landed.
    async fn create_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> RemoteResult<Option<CommentLocationDto>>;

    async fn fetch_post(&self, post_id: EntityId) -> RemoteResult<PostDetailDto>;

    /// A batch of posts, newest first, starting after `last_id`
    async fn fetch_posts(
        &self,
        last_id: Option<EntityId>,
        page_size: u32,
    ) -> RemoteResult<PostListDto>;

    async fn login(&self, request: &LoginRequest) -> RemoteResult<LoginResponseDto>;
}
