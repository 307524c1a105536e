//! Post view model and the collection that owns it

use chrono::{DateTime, Utc};

use super::Author;
use crate::value_objects::{EntityId, ReactionState};

/// A post as seen by the current viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub tags: Vec<String>,
    pub comment_count: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub reactions: ReactionState,
}

/// Posts held by the client: the open detail page plus any listing
#[derive(Debug, Clone, Default)]
pub struct PostBoard {
    pub current: Option<Post>,
    pub posts: Vec<Post>,
    /// Last listed post id, the cursor for the next batch
    pub cursor: Option<EntityId>,
    pub has_more: bool,
}

impl PostBoard {
    /// Find a post by id, preferring the open detail page
    pub fn post_mut(&mut self, id: EntityId) -> Option<&mut Post> {
        if let Some(current) = self.current.as_mut().filter(|p| p.id == id) {
            return Some(current);
        }
        self.posts.iter_mut().find(|p| p.id == id)
    }

    pub fn post(&self, id: EntityId) -> Option<&Post> {
        self.current
            .as_ref()
            .filter(|p| p.id == id)
            .or_else(|| self.posts.iter().find(|p| p.id == id))
    }

    /// Start the listing over with a first batch
    pub fn replace_listing(&mut self, posts: Vec<Post>, cursor: Option<EntityId>, has_more: bool) {
        self.posts = posts;
        self.cursor = cursor;
        self.has_more = has_more;
    }

    /// Append a later batch, skipping posts already listed. Returns how many
    /// were added.
    pub fn extend_listing(
        &mut self,
        posts: Vec<Post>,
        cursor: Option<EntityId>,
        has_more: bool,
    ) -> usize {
        let before = self.posts.len();
        for post in posts {
            if !self.posts.iter().any(|p| p.id == post.id) {
                self.posts.push(post);
            }
        }
        if cursor.is_some() {
            self.cursor = cursor;
        }
        self.has_more = has_more;
        self.posts.len() - before
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.posts.clear();
        self.cursor = None;
        self.has_more = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id: EntityId::new(id),
            title: title.to_string(),
            content: String::new(),
            author: Author::new(EntityId::new(1), "alice"),
            tags: Vec::new(),
            comment_count: 0,
            created_at: None,
            reactions: ReactionState::default(),
        }
    }

    #[test]
    fn test_post_mut_prefers_current() {
        let mut board = PostBoard {
            current: Some(post(1, "detail")),
            posts: vec![post(1, "listed"), post(2, "other")],
            ..PostBoard::default()
        };

        assert_eq!(board.post_mut(EntityId::new(1)).unwrap().title, "detail");
        assert_eq!(board.post_mut(EntityId::new(2)).unwrap().title, "other");
        assert!(board.post_mut(EntityId::new(3)).is_none());
    }

    #[test]
    fn test_extend_listing_skips_known_posts() {
        let mut board = PostBoard::default();
        board.replace_listing(vec![post(9, "a"), post(8, "b")], Some(EntityId::new(8)), true);

        let added = board.extend_listing(
            vec![post(8, "b again"), post(7, "c")],
            Some(EntityId::new(7)),
            false,
        );

        assert_eq!(added, 1);
        let ids: Vec<_> = board.posts.iter().map(|p| p.id.into_inner()).collect();
        assert_eq!(ids, [9, 8, 7]);
        assert_eq!(board.posts[1].title, "b");
        assert_eq!(board.cursor, Some(EntityId::new(7)));
        assert!(!board.has_more);
    }
}
