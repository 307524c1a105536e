//! Shared fixtures for service tests

use std::sync::Arc;

use sbbs_common::{BoardConfig, JwtService};
use sbbs_core::{EntityId, NewComment};

use crate::services::{AuthService, PostService, ServiceContext};
use crate::store::InMemoryBoard;

pub(crate) const SEED_PASSWORD: &str = "hunter22";

pub(crate) struct Seeded {
    pub ctx: ServiceContext,
    pub board: Arc<InMemoryBoard>,
    /// alice, author of the post
    pub user_id: EntityId,
    /// bob, author of the only comment
    pub other_id: EntityId,
    pub post_id: EntityId,
    pub comment_id: EntityId,
}

/// Two users, one post, one top-level comment, debouncing off
pub(crate) async fn seeded_context() -> Seeded {
    let board = Arc::new(InMemoryBoard::new());
    let config = BoardConfig {
        debounce_ms: 0,
        ..BoardConfig::default()
    };
    let ctx = ServiceContext::in_memory(
        board.clone(),
        Arc::new(JwtService::new("test-secret", 3600)),
        &config,
    );

    let auth = AuthService::new(&ctx);
    let alice = auth.register("alice", SEED_PASSWORD, None).await.unwrap();
    let bob = auth.register("bob", SEED_PASSWORD, None).await.unwrap();
    let post = PostService::new(&ctx)
        .create(alice.id, "Hello", "First post", vec!["intro".into()])
        .await
        .unwrap();
    let comment = ctx
        .comment_repo()
        .create(NewComment {
            post_id: post.id,
            author_id: bob.id,
            parent_id: None,
            reply_to_id: None,
            content: "nice".into(),
        })
        .await
        .unwrap();

    Seeded {
        ctx,
        board,
        user_id: alice.id,
        other_id: bob.id,
        post_id: post.id,
        comment_id: comment.id,
    }
}
