//! Reaction handlers
//!
//! Like, dislike and their cancellations on posts and comments.

use axum::extract::{Path, State};
use sbbs_core::ReactionKind;
use sbbs_service::ReactionService;

use crate::extractors::{AuthUser, ReactionPath, ReactionVerb};
use crate::response::{ApiMessage, ApiResult};
use crate::state::AppState;

/// Apply or cancel a reaction
///
/// POST /v4/{post|comment}/{like|cancelLike|dislike|cancelDislike}/{id}
pub async fn react(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ReactionPath>,
) -> ApiResult<ApiMessage> {
    let target = path.target()?;
    let service = ReactionService::new(state.service_context());

    let message = match path.verb()? {
        ReactionVerb::Apply(kind) => {
            service.apply(auth.user_id, target, kind).await?;
            match kind {
                ReactionKind::Like => "Liked",
                ReactionKind::Dislike => "Disliked",
            }
        }
        ReactionVerb::Cancel(kind) => {
            service.cancel(auth.user_id, target, kind).await?;
            match kind {
                ReactionKind::Like => "Like cancelled",
                ReactionKind::Dislike => "Dislike cancelled",
            }
        }
    };
    Ok(ApiMessage(message))
}
