//! HTTP implementation of [`CommunityApi`]
//!
//! Every response body is decoded as an envelope regardless of the HTTP
//! status, so conflict codes reach the reconciler intact. Only bodies that
//! are not envelopes fall back to the status line.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use sbbs_common::ClientConfig;
use sbbs_core::dto::{
    Ack, CommentDto, CommentLocationDto, CommentPageDto, CreateCommentRequest, Envelope,
    LoginRequest, LoginResponseDto, PostDetailDto, PostListDto, PostListQuery,
};
use sbbs_core::{CommunityApi, EntityId, ReactionKind, RemoteError, RemoteResult, TargetRef};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::guard::RequestGuard;
use crate::session::Session;

/// Header carrying the guard's device id
pub const DEVICE_ID_HEADER: &str = "X-Device-Id";

pub struct HttpCommunityApi {
    client: Client,
    base_url: String,
    session: Arc<Session>,
    guard: Arc<RequestGuard>,
}

impl HttpCommunityApi {
    pub fn new(
        config: &ClientConfig,
        session: Arc<Session>,
        guard: Arc<RequestGuard>,
    ) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
            guard,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .header(DEVICE_ID_HEADER, self.guard.device_id());
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> RemoteResult<Envelope<T>> {
        self.guard.admit(path).await?;

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        debug!(path, status = status.as_u16(), bytes = body.len(), "Response received");

        decode_envelope(status, &body)
    }

    async fn ack(&self, path: &str, builder: RequestBuilder) -> RemoteResult<Ack> {
        self.send::<IgnoredAny>(path, builder).await?.into_ack()
    }
}

fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> RemoteResult<Envelope<T>> {
    match serde_json::from_slice::<Envelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if status == StatusCode::UNAUTHORIZED => Err(RemoteError::Unauthorized),
        Err(_) if status == StatusCode::TOO_MANY_REQUESTS => {
            Err(RemoteError::Throttled(status.to_string()))
        }
        Err(_) if !status.is_success() => Err(RemoteError::Rejected {
            code: i32::from(status.as_u16()),
            message: status.to_string(),
        }),
        Err(e) => Err(RemoteError::Decode(e.to_string())),
    }
}

fn transport(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::TimedOut
    } else {
        RemoteError::Transport(err.to_string())
    }
}

fn reaction_path(target: TargetRef, verb: &str) -> String {
    format!("/v4/{}/{verb}/{}", target.kind.as_path(), target.id)
}

#[async_trait]
impl CommunityApi for HttpCommunityApi {
    #[instrument(skip(self), fields(target = %target))]
    async fn react(&self, target: TargetRef, kind: ReactionKind) -> RemoteResult<Ack> {
        let path = reaction_path(target, kind.apply_verb());
        self.ack(&path, self.request(Method::POST, &path)).await
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn cancel_reaction(&self, target: TargetRef, kind: ReactionKind) -> RemoteResult<Ack> {
        let path = reaction_path(target, kind.cancel_verb());
        self.ack(&path, self.request(Method::POST, &path)).await
    }

    #[instrument(skip(self))]
    async fn fetch_comments(
        &self,
        post_id: EntityId,
        page: u32,
        page_size: u32,
    ) -> RemoteResult<CommentPageDto> {
        let path = "/v3/getComments";
        let builder = self.request(Method::GET, path).query(&[
            ("postId", post_id.to_string()),
            ("pageNum", page.to_string()),
            ("pageSize", page_size.to_string()),
        ]);
        self.send(path, builder).await?.into_data()
    }

    #[instrument(skip(self))]
    async fn fetch_replies(&self, comment_id: EntityId) -> RemoteResult<Vec<CommentDto>> {
        let path = format!("/v3/comment/{comment_id}/replies");
        let builder = self.request(Method::GET, &path);
        Ok(self
            .send::<Vec<CommentDto>>(&path, builder)
            .await?
            .into_optional()?
            .unwrap_or_default())
    }

    #[instrument(skip(self, request), fields(post_id = %request.post_id))]
    async fn create_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> RemoteResult<Option<CommentLocationDto>> {
        let path = "/v3/comment";
        let builder = self.request(Method::POST, path).json(request);
        self.send(path, builder).await?.into_optional()
    }

    #[instrument(skip(self))]
    async fn fetch_post(&self, post_id: EntityId) -> RemoteResult<PostDetailDto> {
        let path = format!("/v2/post/{post_id}");
        let builder = self.request(Method::GET, &path);
        self.send(&path, builder).await?.into_data()
    }

    #[instrument(skip(self))]
    async fn fetch_posts(
        &self,
        last_id: Option<EntityId>,
        page_size: u32,
    ) -> RemoteResult<PostListDto> {
        let path = "/v2/list";
        let builder = self
            .request(Method::GET, path)
            .query(&PostListQuery { last_id, page_size });
        self.send(path, builder).await?.into_data()
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    async fn login(&self, request: &LoginRequest) -> RemoteResult<LoginResponseDto> {
        let path = "/v1/auth/login";
        let builder = self.request(Method::POST, path).json(request);
        self.send(path, builder).await?.into_data()
    }
}

impl std::fmt::Debug for HttpCommunityApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCommunityApi")
            .field("base_url", &self.base_url)
            .field("guard", &self.guard)
            .finish()
    }
}
