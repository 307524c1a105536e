//! Reaction service
//!
//! Applies and cancels likes/dislikes on posts and comments. A user holds at
//! most one reaction per target; applying the opposite reaction flips it.

use sbbs_core::{DomainError, EntityId, ReactionKind, TargetKind, TargetRef};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply `kind` to the target
    #[instrument(skip(self), fields(target = %target))]
    pub async fn apply(
        &self,
        user_id: EntityId,
        target: TargetRef,
        kind: ReactionKind,
    ) -> ServiceResult<()> {
        self.ctx
            .debouncer()
            .check(user_id, kind.apply_verb(), target)?;
        self.ensure_target(target).await?;

        let current = self.ctx.reaction_repo().find(user_id, target).await?;
        if current == Some(kind) {
            return Err(DomainError::AlreadyReacted(kind).into());
        }

        self.swap(user_id, target, current, Some(kind)).await?;

        info!(
            user_id = %user_id,
            kind = %kind,
            flipped = current.is_some(),
            "Reaction applied"
        );
        Ok(())
    }

    /// Cancel `kind` on the target
    #[instrument(skip(self), fields(target = %target))]
    pub async fn cancel(
        &self,
        user_id: EntityId,
        target: TargetRef,
        kind: ReactionKind,
    ) -> ServiceResult<()> {
        self.ctx
            .debouncer()
            .check(user_id, kind.cancel_verb(), target)?;
        self.ensure_target(target).await?;

        let current = self.ctx.reaction_repo().find(user_id, target).await?;
        if current != Some(kind) {
            return Err(DomainError::NotReacted(kind).into());
        }

        self.swap(user_id, target, current, None).await?;

        info!(user_id = %user_id, kind = %kind, "Reaction cancelled");
        Ok(())
    }

    /// The viewer's reaction on a target
    pub async fn viewer_reaction(
        &self,
        viewer: Option<EntityId>,
        target: TargetRef,
    ) -> ServiceResult<Option<ReactionKind>> {
        match viewer {
            Some(user_id) => Ok(self.ctx.reaction_repo().find(user_id, target).await?),
            None => Ok(None),
        }
    }

    async fn swap(
        &self,
        user_id: EntityId,
        target: TargetRef,
        expected: Option<ReactionKind>,
        next: Option<ReactionKind>,
    ) -> ServiceResult<()> {
        if self
            .ctx
            .reaction_repo()
            .swap(user_id, target, expected, next)
            .await?
        {
            Ok(())
        } else {
            Err(DomainError::ReactionRaced.into())
        }
    }

    async fn ensure_target(&self, target: TargetRef) -> ServiceResult<()> {
        let exists = match target.kind {
            TargetKind::Post => self.ctx.post_repo().find_by_id(target.id).await?.is_some(),
            TargetKind::Comment => self
                .ctx
                .comment_repo()
                .find_by_id(target.id)
                .await?
                .is_some(),
        };
        if exists {
            Ok(())
        } else {
            Err(ServiceError::Domain(match target.kind {
                TargetKind::Post => DomainError::PostNotFound(target.id),
                TargetKind::Comment => DomainError::CommentNotFound(target.id),
            }))
        }
    }
}
