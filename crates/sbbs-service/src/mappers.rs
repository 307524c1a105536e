//! Mappers from stored records to response payloads

use sbbs_core::dto::{CommentDto, PostDto, UserDto};
use sbbs_core::{ReactionKind, StoredComment, StoredPost, UserAccount};

const UNKNOWN_USER: &str = "unknown";

pub(crate) fn user_dto(user: &UserAccount) -> UserDto {
    UserDto {
        id: user.id,
        username: user.username.clone(),
        avatar: user.avatar.clone(),
    }
}

pub(crate) fn comment_dto(
    comment: &StoredComment,
    author: Option<&UserAccount>,
    // Author of the reply this one answers
    reply_to: Option<&UserAccount>,
    viewer_reaction: Option<ReactionKind>,
) -> CommentDto {
    CommentDto {
        id: comment.id,
        post_id: comment.post_id,
        user_id: comment.author_id,
        parent_id: comment.parent_id,
        username: author.map_or_else(|| UNKNOWN_USER.to_string(), |a| a.username.clone()),
        avatar: author.and_then(|a| a.avatar.clone()),
        content: comment.content.clone(),
        like_count: comment.like_count,
        dislike_count: comment.dislike_count,
        reply_count: comment.reply_count,
        is_liked: viewer_reaction == Some(ReactionKind::Like),
        is_disliked: viewer_reaction == Some(ReactionKind::Dislike),
        reply_to_id: comment.reply_to_id,
        reply_to_username: reply_to.map(|u| u.username.clone()),
        created: Some(comment.created_at),
    }
}

pub(crate) fn post_dto(post: &StoredPost, author: Option<&UserAccount>) -> PostDto {
    PostDto {
        id: post.id,
        user_id: post.author_id,
        username: author.map_or_else(|| UNKNOWN_USER.to_string(), |a| a.username.clone()),
        avatar: author.and_then(|a| a.avatar.clone()),
        title: post.title.clone(),
        content: post.content.clone(),
        tags: post.tags.clone(),
        like_count: post.like_count,
        dislike_count: post.dislike_count,
        comment_count: post.comment_count,
        created: Some(post.created_at),
    }
}
