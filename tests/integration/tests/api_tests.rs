//! API Integration Tests
//!
//! Raw HTTP against an in-process server over the seeded demo board.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_envelope, assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use sbbs_core::dto::{
    CommentDto, CommentLocationDto, CommentPageDto, PostDetailDto, PostListDto,
};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/v2/post/1").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(ALICE).await.unwrap();
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post(
            "/v1/auth/login",
            &serde_json::json!({"username": ALICE, "password": "wrong-password"}),
        )
        .await
        .unwrap();

    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(envelope.code, 400);
    assert!(envelope.msg.unwrap().contains("Invalid username or password"));
}

#[tokio::test]
async fn test_reaction_requires_auth() {
    let server = TestServer::start().await.unwrap();
    let path = reaction_path("post", "like", server.demo.post_id);

    let response = server.post(&path, &serde_json::json!({})).await.unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(envelope.code, 401);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let server = TestServer::start().await.unwrap();
    let path = reaction_path("post", "like", server.demo.post_id);

    let response = server.post_empty_auth(&path, "not-a-token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_like_then_like_again_conflicts() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(BOB).await.unwrap();
    let path = reaction_path("post", "like", server.demo.post_id);

    let response = server.post_empty_auth(&path, &token).await.unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(envelope.code, 200);

    let response = server.post_empty_auth(&path, &token).await.unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::CONFLICT)
        .await
        .unwrap();
    assert_eq!(envelope.code, 3);
}

#[tokio::test]
async fn test_cancel_without_reaction_conflicts() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(BOB).await.unwrap();
    let path = reaction_path("comment", "cancelDislike", server.demo.first_comment_id);

    let response = server.post_empty_auth(&path, &token).await.unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::CONFLICT)
        .await
        .unwrap();
    assert_eq!(envelope.code, 6);
}

#[tokio::test]
async fn test_dislike_replaces_like_and_counts_follow() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(CAROL).await.unwrap();
    let post_id = server.demo.post_id;

    for verb in ["like", "dislike"] {
        let response = server
            .post_empty_auth(&reaction_path("post", verb, post_id), &token)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .get_auth(&format!("/v2/post/{post_id}"), &token)
        .await
        .unwrap();
    let detail = assert_envelope::<PostDetailDto>(response, StatusCode::OK)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert!(!detail.liked);
    assert!(detail.disliked);
    assert_eq!(detail.post.like_count, 0);
    assert_eq!(detail.post.dislike_count, 1);
}

#[tokio::test]
async fn test_unknown_target() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(BOB).await.unwrap();

    let response = server
        .post_empty_auth("/v4/comment/like/999999", &token)
        .await
        .unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(envelope.code, 2);
}

#[tokio::test]
async fn test_unknown_reaction_verb() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(BOB).await.unwrap();
    let path = reaction_path("post", "love", server.demo.post_id);

    let response = server.post_empty_auth(&path, &token).await.unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(envelope.code, 400);
}

// ============================================================================
// Post Listing Tests
// ============================================================================

#[tokio::test]
async fn test_post_listing_carries_viewer_flags() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(BOB).await.unwrap();
    let post_id = server.demo.post_id;
    let response = server
        .post_empty_auth(&reaction_path("post", "like", post_id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let as_bob = assert_envelope::<PostListDto>(
        server.get_auth("/v2/list?pageSize=10", &token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap()
    .into_data()
    .unwrap();
    let anonymous = assert_envelope::<PostListDto>(
        server.get("/v2/list").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap()
    .into_data()
    .unwrap();

    assert_eq!(as_bob.list.len(), 1);
    assert_eq!(as_bob.list[0].post.id, post_id);
    assert!(as_bob.list[0].is_liked);
    assert_eq!(as_bob.list[0].post.like_count, 1);
    assert!(!as_bob.has_next_page);
    assert_eq!(as_bob.last_id, Some(post_id));
    assert!(!anonymous.list[0].is_liked);
}

#[tokio::test]
async fn test_post_listing_after_last_post_is_empty() {
    let server = TestServer::start().await.unwrap();
    let path = format!("/v2/list?lastId={}", server.demo.post_id);

    let listing = assert_envelope::<PostListDto>(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert!(listing.list.is_empty());
    assert!(!listing.has_next_page);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_second_page_of_comments() {
    let server = TestServer::start().await.unwrap();
    let path = format!(
        "/v3/getComments?postId={}&pageNum=2&pageSize=15",
        server.demo.post_id
    );

    let response = server.get(&path).await.unwrap();
    let page = assert_envelope::<CommentPageDto>(response, StatusCode::OK)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(page.total, SEEDED_COMMENTS);
    assert_eq!(page.comments.len(), 5);
    assert_eq!(page.current, 2);
    assert_eq!(page.pages, 2);
    assert!(!page.has_next);
    assert!(page.has_previous);
}

#[tokio::test]
async fn test_comments_query_requires_post_id() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/v3/getComments?pageNum=1").await.unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(envelope.code, 400);
}

#[tokio::test]
async fn test_viewer_flags_follow_token() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(BOB).await.unwrap();
    let comment_id = server.demo.first_comment_id;
    let response = server
        .post_empty_auth(&reaction_path("comment", "like", comment_id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let path = format!("/v3/getComments?postId={}&pageNum=1", server.demo.post_id);
    let as_bob = assert_envelope::<CommentPageDto>(
        server.get_auth(&path, &token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap()
    .into_data()
    .unwrap();
    let anonymous = assert_envelope::<CommentPageDto>(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert!(as_bob.comments[0].is_liked);
    assert_eq!(as_bob.comments[0].like_count, 1);
    assert!(!anonymous.comments[0].is_liked);
    assert_eq!(anonymous.comments[0].like_count, 1);
}

#[tokio::test]
async fn test_new_comment_reports_its_page() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(CAROL).await.unwrap();

    let response = server
        .post_auth(
            "/v3/comment",
            &token,
            &comment_body(server.demo.post_id, "twenty-first"),
        )
        .await
        .unwrap();
    let location = assert_envelope::<CommentLocationDto>(response, StatusCode::OK)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(location.page, Some(2));
}

#[tokio::test]
async fn test_reply_has_no_location_and_is_listed() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(CAROL).await.unwrap();
    let parent = server.demo.first_comment_id;

    let response = server
        .post_auth(
            "/v3/comment",
            &token,
            &reply_body(server.demo.post_id, parent, "me too"),
        )
        .await
        .unwrap();
    let envelope = assert_envelope::<CommentLocationDto>(response, StatusCode::OK)
        .await
        .unwrap();
    assert!(envelope.into_optional().unwrap().is_none());

    let response = server
        .get(&format!("/v3/comment/{parent}/replies"))
        .await
        .unwrap();
    let replies = assert_envelope::<Vec<CommentDto>>(response, StatusCode::OK)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[1].content, "me too");
    assert_eq!(replies[1].username, CAROL);
}

#[tokio::test]
async fn test_blank_comment_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for(CAROL).await.unwrap();

    let response = server
        .post_auth("/v3/comment", &token, &comment_body(server.demo.post_id, "   "))
        .await
        .unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(envelope.code, 400);
}
