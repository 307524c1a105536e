//! Test support: a scripted [`CommunityApi`] and fixtures

use async_trait::async_trait;
use parking_lot::Mutex;
use sbbs_core::dto::{
    Ack, CommentDto, CommentLocationDto, CommentPageDto, CreateCommentRequest, LoginRequest,
    LoginResponseDto, PostDetailDto, PostDto, PostListDto, PostListItemDto,
};
use sbbs_core::{
    Author, CommunityApi, EntityId, ReactionKind, RemoteError, RemoteResult, TargetRef,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::context::{ClientContext, ClientContextBuilder};
use crate::notifier::RecordingNotifier;
use crate::session::{Credential, Session};

type Step<T> = (Option<Duration>, RemoteResult<T>);

/// Answers calls from per-endpoint queues and records every call.
///
/// Unscripted reaction calls succeed; unscripted fetches fail.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    reactions: Mutex<VecDeque<Step<Ack>>>,
    comments: Mutex<VecDeque<RemoteResult<CommentPageDto>>>,
    replies: Mutex<VecDeque<Step<Vec<CommentDto>>>>,
    creates: Mutex<VecDeque<RemoteResult<Option<CommentLocationDto>>>>,
    posts: Mutex<VecDeque<RemoteResult<PostDetailDto>>>,
    listings: Mutex<VecDeque<RemoteResult<PostListDto>>>,
    logins: Mutex<VecDeque<RemoteResult<LoginResponseDto>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reaction(&self, result: RemoteResult<Ack>) {
        self.reactions.lock().push_back((None, result));
    }

    pub fn push_reaction_delayed(&self, delay: Duration, result: RemoteResult<Ack>) {
        self.reactions.lock().push_back((Some(delay), result));
    }

    pub fn push_comments(&self, result: RemoteResult<CommentPageDto>) {
        self.comments.lock().push_back(result);
    }

    pub fn push_replies(&self, result: RemoteResult<Vec<CommentDto>>) {
        self.replies.lock().push_back((None, result));
    }

    pub fn push_replies_delayed(&self, delay: Duration, result: RemoteResult<Vec<CommentDto>>) {
        self.replies.lock().push_back((Some(delay), result));
    }

    pub fn push_create(&self, result: RemoteResult<Option<CommentLocationDto>>) {
        self.creates.lock().push_back(result);
    }

    pub fn push_post(&self, result: RemoteResult<PostDetailDto>) {
        self.posts.lock().push_back(result);
    }

    pub fn push_listing(&self, result: RemoteResult<PostListDto>) {
        self.listings.lock().push_back(result);
    }

    pub fn push_login(&self, result: RemoteResult<LoginResponseDto>) {
        self.logins.lock().push_back(result);
    }

    /// Calls made so far, e.g. `"cancelDislike post:1"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    async fn play<T>(step: Option<Step<T>>, fallback: impl FnOnce() -> RemoteResult<T>) -> RemoteResult<T> {
        match step {
            Some((delay, result)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => fallback(),
        }
    }
}

fn unscripted<T>(what: &str) -> RemoteResult<T> {
    Err(RemoteError::Transport(format!("unscripted {what}")))
}

#[async_trait]
impl CommunityApi for ScriptedApi {
    async fn react(&self, target: TargetRef, kind: ReactionKind) -> RemoteResult<Ack> {
        self.record(format!("{} {target}", kind.apply_verb()));
        let step = self.reactions.lock().pop_front();
        Self::play(step, || Ok(Ack::default())).await
    }

    async fn cancel_reaction(&self, target: TargetRef, kind: ReactionKind) -> RemoteResult<Ack> {
        self.record(format!("{} {target}", kind.cancel_verb()));
        let step = self.reactions.lock().pop_front();
        Self::play(step, || Ok(Ack::default())).await
    }

    async fn fetch_comments(
        &self,
        post_id: EntityId,
        page: u32,
        page_size: u32,
    ) -> RemoteResult<CommentPageDto> {
        self.record(format!("comments {post_id} {page}/{page_size}"));
        let next = self.comments.lock().pop_front();
        next.unwrap_or_else(|| unscripted("comments"))
    }

    async fn fetch_replies(&self, comment_id: EntityId) -> RemoteResult<Vec<CommentDto>> {
        self.record(format!("replies {comment_id}"));
        let step = self.replies.lock().pop_front();
        Self::play(step, || unscripted("replies")).await
    }

    async fn create_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> RemoteResult<Option<CommentLocationDto>> {
        self.record(format!("comment {}", request.content));
        let next = self.creates.lock().pop_front();
        next.unwrap_or_else(|| unscripted("comment"))
    }

    async fn fetch_post(&self, post_id: EntityId) -> RemoteResult<PostDetailDto> {
        self.record(format!("post {post_id}"));
        let next = self.posts.lock().pop_front();
        next.unwrap_or_else(|| unscripted("post"))
    }

    async fn fetch_posts(
        &self,
        last_id: Option<EntityId>,
        page_size: u32,
    ) -> RemoteResult<PostListDto> {
        let after = last_id.map_or_else(|| "start".to_string(), |id| id.to_string());
        self.record(format!("posts {after}/{page_size}"));
        let next = self.listings.lock().pop_front();
        next.unwrap_or_else(|| unscripted("posts"))
    }

    async fn login(&self, request: &LoginRequest) -> RemoteResult<LoginResponseDto> {
        self.record(format!("login {}", request.username));
        let next = self.logins.lock().pop_front();
        next.unwrap_or_else(|| unscripted("login"))
    }
}

pub(crate) fn viewer() -> Author {
    Author::new(EntityId::new(1), "alice")
}

/// Signed-in context over `api`, recording notices
pub(crate) fn signed_in(api: Arc<ScriptedApi>) -> (ClientContext, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let session = Arc::new(Session::with_credential(Credential::new("token", viewer())));
    let ctx = ClientContextBuilder::new(api)
        .session(session)
        .notifier(notifier.clone())
        .build();
    (ctx, notifier)
}

pub(crate) fn comment_dto(id: i64, post_id: i64) -> CommentDto {
    CommentDto {
        id: EntityId::new(id),
        post_id: EntityId::new(post_id),
        user_id: EntityId::new(2),
        parent_id: None,
        username: "bob".into(),
        avatar: None,
        content: format!("comment {id}"),
        like_count: 0,
        dislike_count: 0,
        reply_count: 0,
        is_liked: false,
        is_disliked: false,
        reply_to_id: None,
        reply_to_username: None,
        created: None,
    }
}

pub(crate) fn reply_dto(id: i64, post_id: i64, parent_id: i64) -> CommentDto {
    CommentDto {
        parent_id: Some(EntityId::new(parent_id)),
        ..comment_dto(id, post_id)
    }
}

/// Page `current` of a post with `total` comments, ids starting at `first_id`
pub(crate) fn page_dto(post_id: i64, total: u64, current: u32, size: u32, first_id: i64) -> CommentPageDto {
    let page = sbbs_core::PageInfo::compute(total, current, size);
    let on_page = total.saturating_sub(page.offset() as u64).min(u64::from(size));
    CommentPageDto {
        comments: (0..on_page as i64)
            .map(|i| comment_dto(first_id + i, post_id))
            .collect(),
        total,
        size: page.size,
        current: page.current,
        pages: page.pages,
        has_next: page.has_next,
        has_previous: page.has_previous,
    }
}

pub(crate) fn post_detail(id: i64, liked: bool, disliked: bool, likes: u32, dislikes: u32) -> PostDetailDto {
    PostDetailDto {
        post: PostDto {
            id: EntityId::new(id),
            user_id: EntityId::new(2),
            username: "bob".into(),
            avatar: None,
            title: "title".into(),
            content: "content".into(),
            tags: Vec::new(),
            like_count: likes,
            dislike_count: dislikes,
            comment_count: 0,
            created: None,
        },
        liked,
        disliked,
    }
}

/// A listing batch of `count` posts counting down from `newest`
pub(crate) fn post_list(newest: i64, count: i64, has_next_page: bool) -> PostListDto {
    let list: Vec<_> = (0..count)
        .map(|i| PostListItemDto {
            post: post_detail(newest - i, false, false, 0, 0).post,
            is_liked: false,
            is_disliked: false,
        })
        .collect();
    PostListDto {
        last_id: list.last().map(|item| item.post.id),
        list,
        has_next_page,
    }
}
