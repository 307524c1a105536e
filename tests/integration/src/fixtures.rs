//! Test fixtures
//!
//! Demo accounts seeded by every [`crate::TestServer`] and request bodies
//! for the raw HTTP tests.

use sbbs_core::dto::CreateCommentRequest;
use sbbs_core::EntityId;

/// Author of the demo post and of the first demo comment
pub const ALICE: &str = "alice";
/// Author of the demo reply
pub const BOB: &str = "bob";
pub const CAROL: &str = "carol";

/// Top-level comments seeded on the demo post
pub const SEEDED_COMMENTS: u64 = 20;

pub fn comment_body(post_id: EntityId, content: &str) -> CreateCommentRequest {
    CreateCommentRequest::top_level(post_id, content.to_string())
}

pub fn reply_body(post_id: EntityId, parent_id: EntityId, content: &str) -> CreateCommentRequest {
    CreateCommentRequest::reply(post_id, parent_id, None, content.to_string())
}

/// Path of a reaction endpoint, e.g. `/v4/post/like/4`
pub fn reaction_path(kind: &str, verb: &str, id: EntityId) -> String {
    format!("/v4/{kind}/{verb}/{id}")
}
