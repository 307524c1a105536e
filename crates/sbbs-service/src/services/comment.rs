//! Comment service
//!
//! Pages top-level comments, lists replies, and stores new comments.

use sbbs_core::dto::{
    CommentDto, CommentLocationDto, CommentPageDto, CreateCommentRequest, MAX_CONTENT_LENGTH,
};
use sbbs_core::{DomainError, EntityId, NewComment, PageInfo, StoredComment, TargetRef};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reaction::ReactionService;
use crate::mappers::comment_dto;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 50;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of top-level comments, oldest first
    #[instrument(skip(self))]
    pub async fn list_page(
        &self,
        post_id: EntityId,
        page_num: u32,
        page_size: u32,
        viewer: Option<EntityId>,
    ) -> ServiceResult<CommentPageDto> {
        self.ensure_post(post_id).await?;

        let size = page_size.clamp(1, MAX_PAGE_SIZE);
        let total = self.ctx.comment_repo().count_top_level(post_id).await?;
        let page = PageInfo::compute(total, page_num, size);

        let stored = self
            .ctx
            .comment_repo()
            .list_top_level(post_id, page.offset(), size as usize)
            .await?;
        let comments = self.render_all(&stored, viewer).await?;

        debug!(total, current = page.current, count = comments.len(), "Comment page listed");
        Ok(CommentPageDto {
            comments,
            total: page.total,
            size: page.size,
            current: page.current,
            pages: page.pages,
            has_next: page.has_next,
            has_previous: page.has_previous,
        })
    }

    /// All replies under a top-level comment
    #[instrument(skip(self))]
    pub async fn list_replies(
        &self,
        comment_id: EntityId,
        viewer: Option<EntityId>,
    ) -> ServiceResult<Vec<CommentDto>> {
        if self.ctx.comment_repo().find_by_id(comment_id).await?.is_none() {
            return Err(DomainError::CommentNotFound(comment_id).into());
        }
        let stored = self.ctx.comment_repo().list_replies(comment_id).await?;
        self.render_all(&stored, viewer).await
    }

    /// Store a comment or reply.
    ///
    /// A top-level comment reports the page it landed on; replies report none.
    #[instrument(skip(self, request), fields(post_id = %request.post_id))]
    pub async fn create(
        &self,
        author_id: EntityId,
        request: &CreateCommentRequest,
    ) -> ServiceResult<Option<CommentLocationDto>> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyContent.into());
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_CONTENT_LENGTH,
            }
            .into());
        }

        let stored = self
            .ctx
            .comment_repo()
            .create(NewComment {
                post_id: request.post_id,
                author_id,
                parent_id: request.parent_id,
                reply_to_id: request.reply_to_id,
                content: content.to_string(),
            })
            .await?;

        if stored.parent_id.is_some() {
            info!(comment_id = %stored.id, parent_id = ?stored.parent_id, "Reply created");
            return Ok(None);
        }

        let position = self
            .ctx
            .comment_repo()
            .count_top_level(request.post_id)
            .await?;
        let page = PageInfo::page_of(position, self.ctx.page_size());

        info!(comment_id = %stored.id, page, "Comment created");
        Ok(Some(CommentLocationDto {
            comment_id: stored.id,
            page: Some(page),
        }))
    }

    async fn render_all(
        &self,
        stored: &[StoredComment],
        viewer: Option<EntityId>,
    ) -> ServiceResult<Vec<CommentDto>> {
        let reactions = ReactionService::new(self.ctx);
        let mut rendered = Vec::with_capacity(stored.len());
        for comment in stored {
            let author = self.ctx.user_repo().find_by_id(comment.author_id).await?;
            let reply_to = match comment.reply_to_id {
                Some(id) => match self.ctx.comment_repo().find_by_id(id).await? {
                    Some(answered) => self.ctx.user_repo().find_by_id(answered.author_id).await?,
                    None => None,
                },
                None => None,
            };
            let viewer_reaction = reactions
                .viewer_reaction(viewer, TargetRef::comment(comment.id))
                .await?;
            rendered.push(comment_dto(
                comment,
                author.as_ref(),
                reply_to.as_ref(),
                viewer_reaction,
            ));
        }
        Ok(rendered)
    }

    async fn ensure_post(&self, post_id: EntityId) -> ServiceResult<()> {
        match self.ctx.post_repo().find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::PostNotFound(post_id).into()),
        }
    }
}
