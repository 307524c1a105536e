//! Authentication handlers

use axum::extract::State;
use sbbs_core::dto::{LoginRequest, LoginResponseDto};
use sbbs_service::AuthService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Exchange username and password for a bearer token
///
/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiJson<LoginResponseDto>> {
    let response = AuthService::new(state.service_context())
        .login(&request)
        .await?;
    Ok(ApiJson(response))
}
