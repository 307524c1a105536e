//! Demo data for local runs

use sbbs_core::dto::CreateCommentRequest;
use sbbs_core::EntityId;
use tracing::info;

use crate::services::{AuthService, CommentService, PostService, ServiceContext, ServiceResult};

/// Password shared by all demo accounts
pub const DEMO_PASSWORD: &str = "password123";

const DEMO_USERS: [&str; 3] = ["alice", "bob", "carol"];
const DEMO_COMMENTS: usize = 20;

/// Ids created by [`seed_demo`]
#[derive(Debug, Clone)]
pub struct DemoBoard {
    pub user_ids: Vec<EntityId>,
    pub post_id: EntityId,
    pub first_comment_id: EntityId,
}

/// Populate the board with demo accounts, one post, enough comments for two
/// pages and a short reply chain under the first comment
pub async fn seed_demo(ctx: &ServiceContext) -> ServiceResult<DemoBoard> {
    let auth = AuthService::new(ctx);
    let mut user_ids = Vec::with_capacity(DEMO_USERS.len());
    for name in DEMO_USERS {
        user_ids.push(auth.register(name, DEMO_PASSWORD, None).await?.id);
    }

    let post = PostService::new(ctx)
        .create(
            user_ids[0],
            "Welcome to the board",
            "Say hello below. Likes and dislikes are welcome too.",
            vec!["welcome".to_string(), "meta".to_string()],
        )
        .await?;

    let comments = CommentService::new(ctx);
    let mut first_comment_id = None;
    for i in 0..DEMO_COMMENTS {
        let author = user_ids[i % user_ids.len()];
        let request = CreateCommentRequest::top_level(post.id, format!("Comment number {}", i + 1));
        let location = comments.create(author, &request).await?;
        if first_comment_id.is_none() {
            first_comment_id = location.map(|l| l.comment_id);
        }
    }
    let first_comment_id = first_comment_id
        .ok_or_else(|| crate::services::ServiceError::internal("demo comment not stored"))?;

    let reply = CreateCommentRequest::reply(post.id, first_comment_id, None, "Hello back".into());
    comments.create(user_ids[1], &reply).await?;

    info!(post_id = %post.id, users = user_ids.len(), "Demo board seeded");
    Ok(DemoBoard {
        user_ids,
        post_id: post.id,
        first_comment_id,
    })
}
