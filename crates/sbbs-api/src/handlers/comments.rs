//! Comment handlers
//!
//! Paged top-level comments, reply lists and comment creation.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use sbbs_core::dto::{CommentDto, CommentPageDto, CommentsQuery, CreateCommentRequest};
use sbbs_service::CommentService;

use crate::extractors::{ApiQuery, AuthUser, IdPath, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiMessage, ApiResult};
use crate::state::AppState;

/// One page of top-level comments
///
/// GET /v3/getComments?postId&pageNum&pageSize
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiQuery(query): ApiQuery<CommentsQuery>,
) -> ApiResult<ApiJson<CommentPageDto>> {
    let page = CommentService::new(state.service_context())
        .list_page(query.post_id, query.page_num, query.page_size, viewer.viewer())
        .await?;
    Ok(ApiJson(page))
}

/// Replies under a top-level comment
///
/// GET /v3/comment/{id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<ApiJson<Vec<CommentDto>>> {
    let replies = CommentService::new(state.service_context())
        .list_replies(comment_id, viewer.viewer())
        .await?;
    Ok(ApiJson(replies))
}

/// Post a comment or reply
///
/// POST /v3/comment
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Response> {
    let location = CommentService::new(state.service_context())
        .create(auth.user_id, &request)
        .await?;

    Ok(match location {
        Some(location) => ApiJson(location).into_response(),
        None => ApiMessage("Reply posted").into_response(),
    })
}
