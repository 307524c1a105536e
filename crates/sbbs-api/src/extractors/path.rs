//! Path parameter extractors
//!
//! Type-safe extraction of entity ids and reaction routes.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use sbbs_core::{EntityId, ReactionKind, TargetKind, TargetRef};
use serde::Deserialize;

use crate::response::ApiError;

/// A single `:id` path segment parsed as an [`EntityId`]
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub EntityId);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        EntityId::parse(&raw)
            .map(IdPath)
            .map_err(|_| ApiError::invalid_path("Invalid id format"))
    }
}

/// What a reaction route asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionVerb {
    Apply(ReactionKind),
    Cancel(ReactionKind),
}

impl ReactionVerb {
    pub fn parse(verb: &str) -> Option<Self> {
        [ReactionKind::Like, ReactionKind::Dislike]
            .into_iter()
            .find_map(|kind| {
                if verb == kind.apply_verb() {
                    Some(Self::Apply(kind))
                } else if verb == kind.cancel_verb() {
                    Some(Self::Cancel(kind))
                } else {
                    None
                }
            })
    }
}

/// Path parameters of `/v4/:kind/:verb/:id`
#[derive(Debug, Deserialize)]
pub struct ReactionPath {
    pub kind: String,
    pub verb: String,
    pub id: String,
}

impl ReactionPath {
    pub fn target(&self) -> Result<TargetRef, ApiError> {
        let kind: TargetKind = self.kind.parse().map_err(ApiError::invalid_path)?;
        let id = EntityId::parse(&self.id)
            .map_err(|_| ApiError::invalid_path("Invalid id format"))?;
        Ok(TargetRef { kind, id })
    }

    pub fn verb(&self) -> Result<ReactionVerb, ApiError> {
        ReactionVerb::parse(&self.verb)
            .ok_or_else(|| ApiError::invalid_path(format!("unknown reaction: {}", self.verb)))
    }
}
