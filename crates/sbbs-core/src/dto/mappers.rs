//! Conversions from wire payloads into client view models

use super::{CommentDto, PostDetailDto, PostDto, PostListItemDto, UserDto};
use crate::entities::{Author, Comment, Post, ReplyTarget};
use crate::value_objects::ReactionState;

impl From<UserDto> for Author {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            avatar: dto.avatar,
        }
    }
}

impl From<CommentDto> for Comment {
    fn from(dto: CommentDto) -> Self {
        let reply_to = match (dto.reply_to_id, dto.reply_to_username) {
            (Some(id), Some(username)) => Some(ReplyTarget { id, username }),
            _ => None,
        };
        Self {
            id: dto.id,
            post_id: dto.post_id,
            parent_id: dto.parent_id,
            author: Author {
                id: dto.user_id,
                username: dto.username,
                avatar: dto.avatar,
            },
            content: dto.content,
            reply_count: dto.reply_count,
            reply_to,
            created_at: dto.created,
            reactions: ReactionState::new(
                dto.is_liked,
                dto.is_disliked,
                dto.like_count,
                dto.dislike_count,
            ),
            replies: Vec::new(),
            show_replies: false,
            loading_replies: false,
        }
    }
}

fn post_with_flags(post: PostDto, liked: bool, disliked: bool) -> Post {
    Post {
        id: post.id,
        title: post.title,
        content: post.content,
        author: Author {
            id: post.user_id,
            username: post.username,
            avatar: post.avatar,
        },
        tags: post.tags,
        comment_count: post.comment_count,
        created_at: post.created,
        reactions: ReactionState::new(liked, disliked, post.like_count, post.dislike_count),
    }
}

impl From<PostDetailDto> for Post {
    fn from(dto: PostDetailDto) -> Self {
        post_with_flags(dto.post, dto.liked, dto.disliked)
    }
}

impl From<PostListItemDto> for Post {
    fn from(dto: PostListItemDto) -> Self {
        post_with_flags(dto.post, dto.is_liked, dto.is_disliked)
    }
}
