//! Request bodies and query strings

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::DEFAULT_PAGE_SIZE;
use crate::value_objects::EntityId;

/// Maximum length of a comment or reply body
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Body of `POST /v3/comment`; a `parent_id` makes it a reply
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: EntityId,
    #[validate(length(min = 1, max = 5000, message = "content must be 1-5000 characters"))]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<EntityId>,
}

impl CreateCommentRequest {
    pub fn top_level(post_id: EntityId, content: String) -> Self {
        Self {
            post_id,
            content,
            parent_id: None,
            reply_to_id: None,
        }
    }

    pub fn reply(
        post_id: EntityId,
        parent_id: EntityId,
        reply_to_id: Option<EntityId>,
        content: String,
    ) -> Self {
        Self {
            post_id,
            content,
            parent_id: Some(parent_id),
            reply_to_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Query of `GET /v3/getComments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQuery {
    pub post_id: EntityId,
    #[serde(default = "default_page_num")]
    pub page_num: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Query of `GET /v2/list`. Posts come newest first; `last_id` is the last
/// post of the previous batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_id: Option<EntityId>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_num() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
