//! Response payloads as they appear inside the envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::value_objects::EntityId;

/// Counters arrive as numbers, numeric strings or null depending on the endpoint
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CountRepr {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<CountRepr>::deserialize(deserializer)? {
        Some(CountRepr::Number(n)) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
        Some(CountRepr::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A top-level comment or a reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: EntityId,
    pub post_id: EntityId,
    pub user_id: EntityId,
    #[serde(default)]
    pub parent_id: Option<EntityId>,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub content: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub dislike_count: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub reply_count: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub is_disliked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_username: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// One page of top-level comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageDto {
    pub comments: Vec<CommentDto>,
    pub total: u64,
    pub size: u32,
    pub current: u32,
    pub pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Where a new top-level comment landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentLocationDto {
    pub comment_id: EntityId,
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: EntityId,
    pub user_id: EntityId,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub dislike_count: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comment_count: u32,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Post detail with the viewer's reaction flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailDto {
    pub post: PostDto,
    #[serde(default)]
    pub liked: bool,
    #[serde(default, rename = "disLiked")]
    pub disliked: bool,
}

/// A post in the listing, flattened, with the viewer's reaction flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListItemDto {
    #[serde(flatten)]
    pub post: PostDto,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub is_disliked: bool,
}

/// One batch of the post listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListDto {
    pub list: Vec<PostListItemDto>,
    /// Cursor for the next batch
    #[serde(default)]
    pub last_id: Option<EntityId>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponseDto {
    pub token: String,
    pub user: UserDto,
}
