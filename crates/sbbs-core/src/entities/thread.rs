//! Comment thread of one post and the target locator over it

use super::{Comment, PageInfo};
use crate::value_objects::EntityId;

/// A comment located in the thread
#[derive(Debug)]
pub struct Located<'a> {
    pub comment: &'a mut Comment,
    /// Id of the owning top-level comment when the match is a reply
    pub parent: Option<EntityId>,
}

/// The loaded page of top-level comments for one post
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    pub post_id: Option<EntityId>,
    pub comments: Vec<Comment>,
    pub page: PageInfo,
}

impl CommentThread {
    pub fn new(post_id: EntityId, comments: Vec<Comment>, page: PageInfo) -> Self {
        Self {
            post_id: Some(post_id),
            comments,
            page,
        }
    }

    /// Find a comment by id: top-level comments first, then each comment's
    /// cached replies in order.
    pub fn locate_mut(&mut self, id: EntityId) -> Option<Located<'_>> {
        if let Some(index) = self.comments.iter().position(|c| c.id == id) {
            return Some(Located {
                comment: &mut self.comments[index],
                parent: None,
            });
        }

        self.comments.iter_mut().find_map(|parent| {
            let parent_id = parent.id;
            parent
                .replies
                .iter_mut()
                .find(|r| r.id == id)
                .map(|comment| Located {
                    comment,
                    parent: Some(parent_id),
                })
        })
    }

    pub fn locate(&self, id: EntityId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id).or_else(|| {
            self.comments
                .iter()
                .flat_map(|c| c.replies.iter())
                .find(|r| r.id == id)
        })
    }

    /// Top-level comment by id
    pub fn top_level_mut(&mut self, id: EntityId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }

    pub fn top_level(&self, id: EntityId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Append a comment created by the viewer on the current page
    pub fn push_local(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.page.record_insert();
    }

    pub fn is_for(&self, post_id: EntityId) -> bool {
        self.post_id == Some(post_id)
    }

    pub fn clear(&mut self) {
        self.comments.clear();
        self.page = PageInfo {
            size: self.page.size,
            ..PageInfo::default()
        };
    }
}
