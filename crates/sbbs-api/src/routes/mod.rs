//! Route definitions
//!
//! Versioned board endpoints; the version prefix follows the endpoint
//! family rather than a global API version.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, comments, health, posts, reactions};
use crate::state::AppState;

/// Create the board API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(reaction_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/v1/auth/login", post(auth::login))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/v2/list", get(posts::list_posts))
        .route("/v2/post/:id", get(posts::get_post))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/v3/getComments", get(comments::list_comments))
        .route("/v3/comment", post(comments::create_comment))
        .route("/v3/comment/:id/replies", get(comments::list_replies))
}

/// Reactions on posts and comments
fn reaction_routes() -> Router<AppState> {
    Router::new().route("/v4/:kind/:verb/:id", post(reactions::react))
}
