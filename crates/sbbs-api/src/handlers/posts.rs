//! Post handlers

use axum::extract::State;
use sbbs_core::dto::{PostDetailDto, PostListDto, PostListQuery};
use sbbs_service::PostService;

use crate::extractors::{ApiQuery, IdPath, OptionalAuthUser};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Post detail with the viewer's reaction
///
/// GET /v2/post/{id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<PostDetailDto>> {
    let detail = PostService::new(state.service_context())
        .detail(post_id, viewer.viewer())
        .await?;
    Ok(ApiJson(detail))
}

/// Post listing, newest first
///
/// GET /v2/list?lastId&pageSize
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiQuery(query): ApiQuery<PostListQuery>,
) -> ApiResult<ApiJson<PostListDto>> {
    let batch = PostService::new(state.service_context())
        .list(query.last_id, query.page_size, viewer.viewer())
        .await?;
    Ok(ApiJson(batch))
}
