//! In-memory board store implementing the repository ports
//!
//! All collections sit behind one lock so that a reaction swap and the
//! counter update it implies are applied together.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sbbs_core::entities::ReactionCounters;
use sbbs_core::{
    CommentRepository, DomainError, EntityId, NewComment, PostRepository, ReactionKind,
    ReactionRepository, RepoResult, StoredComment, StoredPost, TargetKind, TargetRef, UserAccount,
    UserRepository,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct BoardData {
    last_id: i64,
    users: BTreeMap<EntityId, UserAccount>,
    posts: BTreeMap<EntityId, StoredPost>,
    // Ids grow monotonically, so key order is creation order
    comments: BTreeMap<EntityId, StoredComment>,
    reactions: HashMap<(EntityId, TargetRef), ReactionKind>,
}

impl BoardData {
    fn next_id(&mut self) -> EntityId {
        self.last_id += 1;
        EntityId::new(self.last_id)
    }

    fn counters_mut(&mut self, target: TargetRef) -> RepoResult<&mut dyn ReactionCounters> {
        match target.kind {
            TargetKind::Post => self
                .posts
                .get_mut(&target.id)
                .map(|p| p as &mut dyn ReactionCounters)
                .ok_or(DomainError::PostNotFound(target.id)),
            TargetKind::Comment => self
                .comments
                .get_mut(&target.id)
                .map(|c| c as &mut dyn ReactionCounters)
                .ok_or(DomainError::CommentNotFound(target.id)),
        }
    }

    fn top_level(&self, post_id: EntityId) -> impl Iterator<Item = &StoredComment> {
        self.comments
            .values()
            .filter(move |c| c.post_id == post_id && c.parent_id.is_none())
    }
}

/// Process-local board storage
#[derive(Debug, Default)]
pub struct InMemoryBoard {
    data: RwLock<BoardData>,
}

impl InMemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryBoard {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<UserAccount>> {
        Ok(self.data.read().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserAccount>> {
        Ok(self
            .data
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        avatar: Option<String>,
    ) -> RepoResult<UserAccount> {
        let mut data = self.data.write();
        if data.users.values().any(|u| u.username == username) {
            return Err(DomainError::ValidationError(format!(
                "username {username} is taken"
            )));
        }
        let account = UserAccount {
            id: data.next_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            avatar,
        };
        data.users.insert(account.id, account.clone());
        Ok(account)
    }
}

#[async_trait]
impl PostRepository for InMemoryBoard {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<StoredPost>> {
        Ok(self.data.read().posts.get(&id).cloned())
    }

    async fn list_recent(
        &self,
        before: Option<EntityId>,
        limit: usize,
    ) -> RepoResult<Vec<StoredPost>> {
        let data = self.data.read();
        let newest_first: Box<dyn Iterator<Item = &StoredPost>> = match before {
            Some(before) => Box::new(data.posts.range(..before).rev().map(|(_, p)| p)),
            None => Box::new(data.posts.values().rev()),
        };
        Ok(newest_first.take(limit).cloned().collect())
    }

    async fn create(
        &self,
        author_id: EntityId,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> RepoResult<StoredPost> {
        let mut data = self.data.write();
        if !data.users.contains_key(&author_id) {
            return Err(DomainError::UserNotFound(author_id));
        }
        let post = StoredPost {
            id: data.next_id(),
            author_id,
            title: title.to_string(),
            content: content.to_string(),
            tags,
            like_count: 0,
            dislike_count: 0,
            comment_count: 0,
            created_at: Utc::now(),
        };
        data.posts.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBoard {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<StoredComment>> {
        Ok(self.data.read().comments.get(&id).cloned())
    }

    async fn count_top_level(&self, post_id: EntityId) -> RepoResult<u64> {
        Ok(self.data.read().top_level(post_id).count() as u64)
    }

    async fn list_top_level(
        &self,
        post_id: EntityId,
        offset: usize,
        limit: usize,
    ) -> RepoResult<Vec<StoredComment>> {
        Ok(self
            .data
            .read()
            .top_level(post_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_replies(&self, parent_id: EntityId) -> RepoResult<Vec<StoredComment>> {
        Ok(self
            .data
            .read()
            .comments
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn create(&self, comment: NewComment) -> RepoResult<StoredComment> {
        let mut data = self.data.write();
        if !data.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }

        // Replies to replies hang off the top-level comment and remember
        // whom they answer.
        let mut parent_id = comment.parent_id;
        let mut reply_to_id = comment.reply_to_id;
        if let Some(id) = parent_id {
            let parent = data
                .comments
                .get(&id)
                .ok_or(DomainError::CommentNotFound(id))?;
            if parent.post_id != comment.post_id {
                return Err(DomainError::ReplyOutsidePost {
                    parent: id,
                    post: comment.post_id,
                });
            }
            if let Some(root) = parent.parent_id {
                parent_id = Some(root);
                reply_to_id = reply_to_id.or(Some(id));
            }
        }

        let stored = StoredComment {
            id: data.next_id(),
            post_id: comment.post_id,
            author_id: comment.author_id,
            parent_id,
            reply_to_id,
            content: comment.content,
            like_count: 0,
            dislike_count: 0,
            reply_count: 0,
            created_at: Utc::now(),
        };
        data.comments.insert(stored.id, stored.clone());

        if let Some(parent) = parent_id.and_then(|id| data.comments.get_mut(&id)) {
            parent.reply_count += 1;
        }
        if let Some(post) = data.posts.get_mut(&comment.post_id) {
            post.comment_count += 1;
        }
        Ok(stored)
    }
}

#[async_trait]
impl ReactionRepository for InMemoryBoard {
    async fn find(&self, user_id: EntityId, target: TargetRef) -> RepoResult<Option<ReactionKind>> {
        Ok(self.data.read().reactions.get(&(user_id, target)).copied())
    }

    async fn swap(
        &self,
        user_id: EntityId,
        target: TargetRef,
        expected: Option<ReactionKind>,
        next: Option<ReactionKind>,
    ) -> RepoResult<bool> {
        let mut data = self.data.write();
        let key = (user_id, target);
        if data.reactions.get(&key).copied() != expected {
            return Ok(false);
        }

        data.counters_mut(target)?.shift_reaction(expected, next);
        match next {
            Some(kind) => data.reactions.insert(key, kind),
            None => data.reactions.remove(&key),
        };
        Ok(true)
    }
}
