//! Post service

use sbbs_core::dto::{PostDetailDto, PostListDto, PostListItemDto};
use sbbs_core::{DomainError, EntityId, ReactionKind, StoredPost, TargetRef};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::comment::MAX_PAGE_SIZE;
use super::reaction::ReactionService;
use crate::mappers::post_dto;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post detail with the viewer's reaction flags
    #[instrument(skip(self))]
    pub async fn detail(
        &self,
        post_id: EntityId,
        viewer: Option<EntityId>,
    ) -> ServiceResult<PostDetailDto> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        let author = self.ctx.user_repo().find_by_id(post.author_id).await?;
        let reaction = ReactionService::new(self.ctx)
            .viewer_reaction(viewer, TargetRef::post(post_id))
            .await?;

        Ok(PostDetailDto {
            post: post_dto(&post, author.as_ref()),
            liked: reaction == Some(ReactionKind::Like),
            disliked: reaction == Some(ReactionKind::Dislike),
        })
    }

    /// A batch of posts, newest first, after the `last_id` cursor
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        last_id: Option<EntityId>,
        page_size: u32,
        viewer: Option<EntityId>,
    ) -> ServiceResult<PostListDto> {
        let size = page_size.clamp(1, MAX_PAGE_SIZE) as usize;
        // One extra row tells whether another batch follows
        let mut stored = self.ctx.post_repo().list_recent(last_id, size + 1).await?;
        let has_next_page = stored.len() > size;
        stored.truncate(size);

        let reactions = ReactionService::new(self.ctx);
        let mut list = Vec::with_capacity(stored.len());
        for post in &stored {
            let author = self.ctx.user_repo().find_by_id(post.author_id).await?;
            let reaction = reactions
                .viewer_reaction(viewer, TargetRef::post(post.id))
                .await?;
            list.push(PostListItemDto {
                post: post_dto(post, author.as_ref()),
                is_liked: reaction == Some(ReactionKind::Like),
                is_disliked: reaction == Some(ReactionKind::Dislike),
            });
        }

        debug!(count = list.len(), has_next_page, "Post batch listed");
        Ok(PostListDto {
            last_id: stored.last().map(|p| p.id).or(last_id),
            list,
            has_next_page,
        })
    }

    /// Publish a post
    #[instrument(skip(self, content))]
    pub async fn create(
        &self,
        author_id: EntityId,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> ServiceResult<StoredPost> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation("title is required"));
        }
        if content.trim().is_empty() {
            return Err(DomainError::EmptyContent.into());
        }

        let post = self
            .ctx
            .post_repo()
            .create(author_id, title, content, tags)
            .await?;

        info!(post_id = %post.id, "Post created");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_context;

    #[tokio::test]
    async fn test_detail_reports_viewer_flags() {
        let seeded = seeded_context().await;
        ReactionService::new(&seeded.ctx)
            .apply(seeded.other_id, TargetRef::post(seeded.post_id), ReactionKind::Like)
            .await
            .unwrap();

        let service = PostService::new(&seeded.ctx);
        let detail = service
            .detail(seeded.post_id, Some(seeded.other_id))
            .await
            .unwrap();
        assert!(detail.liked);
        assert!(!detail.disliked);
        assert_eq!(detail.post.like_count, 1);
        assert_eq!(detail.post.username, "alice");
        assert_eq!(detail.post.comment_count, 1);

        let anonymous = service.detail(seeded.post_id, None).await.unwrap();
        assert!(!anonymous.liked);
    }

    #[tokio::test]
    async fn test_list_pages_by_cursor_with_viewer_flags() {
        let seeded = seeded_context().await;
        let service = PostService::new(&seeded.ctx);
        let newer = service
            .create(seeded.other_id, "second", "body", vec![])
            .await
            .unwrap();
        ReactionService::new(&seeded.ctx)
            .apply(seeded.user_id, TargetRef::post(seeded.post_id), ReactionKind::Dislike)
            .await
            .unwrap();

        let first = service.list(None, 1, Some(seeded.user_id)).await.unwrap();
        assert_eq!(first.list.len(), 1);
        assert_eq!(first.list[0].post.id, newer.id);
        assert!(first.has_next_page);
        assert_eq!(first.last_id, Some(newer.id));

        let second = service
            .list(first.last_id, 1, Some(seeded.user_id))
            .await
            .unwrap();
        assert_eq!(second.list[0].post.id, seeded.post_id);
        assert!(second.list[0].is_disliked);
        assert!(!second.has_next_page);

        let done = service.list(second.last_id, 1, None).await.unwrap();
        assert!(done.list.is_empty());
        assert_eq!(done.last_id, second.last_id);
    }

    #[tokio::test]
    async fn test_missing_post() {
        let seeded = seeded_context().await;
        let err = PostService::new(&seeded.ctx)
            .detail(EntityId::new(31337), None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let seeded = seeded_context().await;
        let err = PostService::new(&seeded.ctx)
            .create(seeded.user_id, " ", "body", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
