//! Comment pages, reply lists and post detail

use sbbs_core::{Comment, CommentThread, EntityId, PageInfo, Post, TargetRef};
use tracing::{debug, instrument, warn};

use crate::context::ClientContext;
use crate::error::{ClientError, ClientResult};

/// What a reply toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepliesOutcome {
    /// Visible replies were hidden
    Collapsed,
    /// Cached replies were shown without a fetch
    Shown,
    /// Replies were fetched; carries how many arrived
    Loaded(usize),
    /// A fetch for this comment is already running
    AlreadyLoading,
    /// The comment left the thread while its replies were loading
    Discarded,
}

enum ReplyStep {
    Done(RepliesOutcome),
    Fetch,
}

pub struct CommentLoader<'a> {
    ctx: &'a ClientContext,
}

impl<'a> CommentLoader<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }

    /// Load one page of top-level comments, replacing the current thread.
    ///
    /// On failure the thread is emptied.
    #[instrument(skip(self))]
    pub async fn load_comments(&self, post_id: EntityId, page: u32) -> ClientResult<PageInfo> {
        let page_size = self.ctx.page_size();
        match self
            .ctx
            .api()
            .fetch_comments(post_id, page.max(1), page_size)
            .await
        {
            Ok(dto) => {
                let info = PageInfo {
                    current: dto.current,
                    pages: dto.pages,
                    total: dto.total,
                    size: dto.size,
                    has_next: dto.has_next,
                    has_previous: dto.has_previous,
                };
                let comments: Vec<Comment> = dto.comments.into_iter().map(Comment::from).collect();
                debug!(count = comments.len(), current = info.current, pages = info.pages, "Comments loaded");
                self.ctx
                    .store()
                    .replace_thread(CommentThread::new(post_id, comments, info));
                Ok(info)
            }
            Err(err) => {
                warn!(error = %err, "Failed to load comments");
                self.ctx.store().write_thread(|thread| {
                    thread.clear();
                    thread.post_id = Some(post_id);
                });
                Err(err.into())
            }
        }
    }

    /// Navigate to `page` of the loaded post. Out-of-range pages are
    /// ignored and yield `None`.
    pub async fn change_page(&self, page: u32) -> ClientResult<Option<PageInfo>> {
        let (post_id, info) = self
            .ctx
            .store()
            .read_thread(|thread| (thread.post_id, thread.page));
        let Some(post_id) = post_id else {
            return Ok(None);
        };
        if !info.contains(page) {
            debug!(page, pages = info.pages, "Page out of range, ignored");
            return Ok(None);
        }
        self.load_comments(post_id, page).await.map(Some)
    }

    pub async fn next_page(&self) -> ClientResult<Option<PageInfo>> {
        let current = self.ctx.store().read_thread(|thread| thread.page.current);
        self.change_page(current.saturating_add(1)).await
    }

    pub async fn previous_page(&self) -> ClientResult<Option<PageInfo>> {
        let current = self.ctx.store().read_thread(|thread| thread.page.current);
        self.change_page(current.saturating_sub(1)).await
    }

    /// Show or hide the replies of a top-level comment
    pub async fn toggle_replies(&self, comment_id: EntityId) -> ClientResult<RepliesOutcome> {
        self.load_replies(comment_id, false).await
    }

    /// Show the replies of a top-level comment, fetching them unless cached.
    /// `force` always refetches.
    #[instrument(skip(self))]
    pub async fn load_replies(
        &self,
        comment_id: EntityId,
        force: bool,
    ) -> ClientResult<RepliesOutcome> {
        let step = self.ctx.store().write_thread(|thread| {
            let comment = thread.top_level_mut(comment_id)?;
            if comment.loading_replies {
                return Some(ReplyStep::Done(RepliesOutcome::AlreadyLoading));
            }
            if !force && comment.show_replies {
                comment.show_replies = false;
                return Some(ReplyStep::Done(RepliesOutcome::Collapsed));
            }
            if !force && !comment.replies.is_empty() {
                comment.show_replies = true;
                return Some(ReplyStep::Done(RepliesOutcome::Shown));
            }
            comment.loading_replies = true;
            Some(ReplyStep::Fetch)
        });

        match step {
            None => {
                warn!("Comment is not loaded");
                Err(ClientError::TargetNotFound(TargetRef::comment(comment_id)))
            }
            Some(ReplyStep::Done(outcome)) => Ok(outcome),
            Some(ReplyStep::Fetch) => self.fetch_replies(comment_id).await,
        }
    }

    async fn fetch_replies(&self, comment_id: EntityId) -> ClientResult<RepliesOutcome> {
        let fetched = self.ctx.api().fetch_replies(comment_id).await;

        self.ctx.store().write_thread(|thread| {
            let Some(comment) = thread.top_level_mut(comment_id) else {
                debug!("Comment evicted while replies were loading");
                return match fetched {
                    Ok(_) => Ok(RepliesOutcome::Discarded),
                    Err(err) => Err(err.into()),
                };
            };
            comment.loading_replies = false;

            match fetched {
                Ok(replies) => {
                    comment.replies = replies.into_iter().map(Comment::from).collect();
                    comment.reply_count = comment.reply_count.max(comment.replies.len() as u32);
                    comment.show_replies = true;
                    debug!(count = comment.replies.len(), "Replies loaded");
                    Ok(RepliesOutcome::Loaded(comment.replies.len()))
                }
                Err(err) => {
                    warn!(error = %err, "Failed to load replies");
                    comment.replies.clear();
                    Err(err.into())
                }
            }
        })
    }

    /// Load a post's detail into the board
    #[instrument(skip(self))]
    pub async fn load_post(&self, post_id: EntityId) -> ClientResult<Post> {
        let post = Post::from(self.ctx.api().fetch_post(post_id).await?);
        self.ctx
            .store()
            .write_board(|board| board.current = Some(post.clone()));
        Ok(post)
    }
}
