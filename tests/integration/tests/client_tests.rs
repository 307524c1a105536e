//! Client Integration Tests
//!
//! Drives the board client against an in-process server: optimistic
//! reactions, paging and submissions end to end.
//!
//! Run with: cargo test -p integration-tests --test client_tests

use integration_tests::{assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;
use sbbs_client::{
    ClientError, CommentLoader, CommentPlacement, Composer, Credential, NoticeLevel, PostLoader,
    ReactionOutcome, ReactionReconciler, RepliesOutcome,
};
use sbbs_core::{ReactionState, RemoteError, TargetRef};

#[tokio::test]
async fn test_like_confirmed_by_server() {
    let server = TestServer::start().await.unwrap();
    let (ctx, notifier) = server.signed_in_client(BOB).await.unwrap();
    let post_id = server.demo.post_id;
    let target = TargetRef::post(post_id);
    CommentLoader::new(&ctx).load_post(post_id).await.unwrap();

    let outcome = ReactionReconciler::new(&ctx)
        .toggle_like(target)
        .await
        .unwrap();

    assert_eq!(outcome, ReactionOutcome::Applied);
    assert_eq!(
        ctx.store().reactions(target).unwrap(),
        ReactionState::new(true, false, 1, 0)
    );
    assert_eq!(notifier.total(), 1);

    // The server agrees
    let post = CommentLoader::new(&ctx).load_post(post_id).await.unwrap();
    assert_eq!(post.reactions, ReactionState::new(true, false, 1, 0));
}

#[tokio::test]
async fn test_like_from_post_listing() {
    let server = TestServer::start().await.unwrap();
    let (ctx, _) = server.signed_in_client(BOB).await.unwrap();
    let post_id = server.demo.post_id;
    let target = TargetRef::post(post_id);

    let listed = PostLoader::new(&ctx).load_posts().await.unwrap();
    assert_eq!(listed, 1);
    assert!(!ctx.store().read_board(|board| board.has_more));

    ReactionReconciler::new(&ctx).toggle_like(target).await.unwrap();
    assert_eq!(
        ctx.store().reactions(target).unwrap(),
        ReactionState::new(true, false, 1, 0)
    );

    // A fresh listing carries the viewer's like
    PostLoader::new(&ctx).load_posts().await.unwrap();
    assert_eq!(
        ctx.store().reactions(target).unwrap(),
        ReactionState::new(true, false, 1, 0)
    );
}

#[tokio::test]
async fn test_like_over_dislike() {
    let server = TestServer::start().await.unwrap();
    let (ctx, _) = server.signed_in_client(CAROL).await.unwrap();
    let post_id = server.demo.post_id;
    let target = TargetRef::post(post_id);
    let loader = CommentLoader::new(&ctx);
    let reconciler = ReactionReconciler::new(&ctx);
    loader.load_post(post_id).await.unwrap();

    reconciler.toggle_dislike(target).await.unwrap();
    assert_eq!(
        ctx.store().reactions(target).unwrap(),
        ReactionState::new(false, true, 0, 1)
    );

    reconciler.toggle_like(target).await.unwrap();
    assert_eq!(
        ctx.store().reactions(target).unwrap(),
        ReactionState::new(true, false, 1, 0)
    );

    let post = loader.load_post(post_id).await.unwrap();
    assert_eq!(post.reactions, ReactionState::new(true, false, 1, 0));
}

#[tokio::test]
async fn test_rejected_like_rolls_back_and_signs_out() {
    let server = TestServer::start().await.unwrap();
    let (ctx, notifier) = server.signed_in_client(BOB).await.unwrap();
    let post_id = server.demo.post_id;
    let target = TargetRef::post(post_id);
    CommentLoader::new(&ctx).load_post(post_id).await.unwrap();
    let before = ctx.store().reactions(target).unwrap();

    let user = ctx.session().user().unwrap();
    ctx.session().sign_in(Credential::new("expired-token", user));

    let err = ReactionReconciler::new(&ctx)
        .toggle_like(target)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Remote(RemoteError::Unauthorized)));
    assert_eq!(ctx.store().reactions(target).unwrap(), before);
    assert!(!ctx.session().is_authenticated());
    assert_eq!(notifier.login_prompts(), 1);
    assert_eq!(notifier.total(), 1);
}

#[tokio::test]
async fn test_stale_view_self_heals() {
    let server = TestServer::start().await.unwrap();
    let (ctx, notifier) = server.signed_in_client(BOB).await.unwrap();
    let post_id = server.demo.post_id;
    let target = TargetRef::post(post_id);
    CommentLoader::new(&ctx).load_post(post_id).await.unwrap();

    // Liked from another device after the view was loaded
    let token = server.token_for(BOB).await.unwrap();
    let response = server
        .post_empty_auth(&reaction_path("post", "like", post_id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let outcome = ReactionReconciler::new(&ctx)
        .toggle_like(target)
        .await
        .unwrap();

    assert_eq!(outcome, ReactionOutcome::SelfHealed);
    let local = ctx.store().reactions(target).unwrap();
    assert!(!local.liked);
    assert_eq!(notifier.total(), 1);
    assert_eq!(notifier.last().unwrap().level, NoticeLevel::Success);

    let post = CommentLoader::new(&ctx).load_post(post_id).await.unwrap();
    assert_eq!(post.reactions, local);
}

#[tokio::test]
async fn test_toggle_requires_login() {
    let server = TestServer::start().await.unwrap();
    let (ctx, notifier) = server.client_context().unwrap();
    let post_id = server.demo.post_id;
    CommentLoader::new(&ctx).load_post(post_id).await.unwrap();

    let err = ReactionReconciler::new(&ctx)
        .toggle_like(TargetRef::post(post_id))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::LoginRequired));
    assert_eq!(notifier.login_prompts(), 1);
}

#[tokio::test]
async fn test_paging_through_comments() {
    let server = TestServer::start().await.unwrap();
    let (ctx, _) = server.client_context().unwrap();
    let loader = CommentLoader::new(&ctx);

    let first = loader.load_comments(server.demo.post_id, 1).await.unwrap();
    assert_eq!(first.total, SEEDED_COMMENTS);
    assert!(first.has_next);
    assert_eq!(ctx.store().read_thread(|t| t.comments.len()), 15);

    let second = loader.next_page().await.unwrap().unwrap();
    assert_eq!(second.current, 2);
    assert!(!second.has_next);
    assert!(second.has_previous);
    assert_eq!(ctx.store().read_thread(|t| t.comments.len()), 5);

    assert!(loader.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_like_located_in_reply_list() {
    let server = TestServer::start().await.unwrap();
    let (ctx, _) = server.signed_in_client(CAROL).await.unwrap();
    let loader = CommentLoader::new(&ctx);
    let parent = server.demo.first_comment_id;
    loader.load_comments(server.demo.post_id, 1).await.unwrap();

    assert_eq!(
        loader.toggle_replies(parent).await.unwrap(),
        RepliesOutcome::Loaded(1)
    );
    let reply_id = ctx
        .store()
        .read_thread(|t| t.top_level(parent).unwrap().replies[0].id);

    ReactionReconciler::new(&ctx)
        .toggle_like(TargetRef::comment(reply_id))
        .await
        .unwrap();

    ctx.store().read_thread(|t| {
        let reply = &t.top_level(parent).unwrap().replies[0];
        assert!(reply.reactions.liked);
        assert_eq!(reply.reactions.like_count, 1);
    });
}

#[tokio::test]
async fn test_reply_refreshes_cached_replies() {
    let server = TestServer::start().await.unwrap();
    let (ctx, _) = server.signed_in_client(CAROL).await.unwrap();
    let loader = CommentLoader::new(&ctx);
    let parent = server.demo.first_comment_id;
    loader.load_comments(server.demo.post_id, 1).await.unwrap();
    loader.toggle_replies(parent).await.unwrap();
    loader.toggle_replies(parent).await.unwrap();

    let count = Composer::new(&ctx)
        .submit_reply(parent, "count me in", None)
        .await
        .unwrap();

    assert_eq!(count, 2);
    ctx.store().read_thread(|t| {
        let comment = t.top_level(parent).unwrap();
        assert!(comment.show_replies);
        assert_eq!(comment.replies[1].content, "count me in");
        assert_eq!(comment.replies[1].author.username, CAROL);
    });
}

#[tokio::test]
async fn test_new_comment_lands_on_next_page() {
    let server = TestServer::start().await.unwrap();
    let (ctx, _) = server.signed_in_client(ALICE).await.unwrap();
    let loader = CommentLoader::new(&ctx);
    loader.load_comments(server.demo.post_id, 1).await.unwrap();

    let placement = Composer::new(&ctx)
        .submit_comment("one more  ")
        .await
        .unwrap();

    let CommentPlacement::OnPage { page, comment_id } = placement else {
        panic!("expected the comment on another page, got {placement:?}");
    };
    assert_eq!(page, 2);

    loader.change_page(page).await.unwrap();
    ctx.store().read_thread(|t| {
        let comment = t.top_level(comment_id).unwrap();
        assert_eq!(comment.content, "one more");
    });
}
