//! Comment and reply submission

use sbbs_core::dto::CreateCommentRequest;
use sbbs_core::{Comment, DomainError, EntityId, ReplyTarget, TargetRef};
use tracing::{debug, info, instrument, warn};

use crate::context::ClientContext;
use crate::error::{ClientError, ClientResult};
use crate::loader::CommentLoader;
use crate::notifier::Notice;

/// Where a submitted top-level comment ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPlacement {
    /// Appended to the page on screen
    Appended(EntityId),
    /// Landed on another page; navigate there to see it
    OnPage { page: u32, comment_id: EntityId },
    /// Stored, but the server did not say where
    Unplaced,
}

/// Trim user input. Content ending in an `@mention` keeps exactly one
/// trailing space so the mention stays separated.
pub fn normalize_content(raw: &str) -> Result<String, DomainError> {
    let content = raw.trim_start();
    let trimmed = content.trim_end();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyContent);
    }
    if ends_with_mention(trimmed) && trimmed.len() < content.len() {
        Ok(format!("{trimmed} "))
    } else {
        Ok(trimmed.to_string())
    }
}

fn ends_with_mention(content: &str) -> bool {
    let before_word = content.trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '_');
    before_word.len() < content.len() && before_word.ends_with('@')
}

fn reply_prefix(username: &str) -> String {
    format!("reply to @{username}: ")
}

pub struct Composer<'a> {
    ctx: &'a ClientContext,
}

impl<'a> Composer<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }

    /// Post a top-level comment on the loaded post
    #[instrument(skip(self, raw))]
    pub async fn submit_comment(&self, raw: &str) -> ClientResult<CommentPlacement> {
        let author = self.require_login()?;
        let content = normalize_content(raw)?;
        let (post_id, current_page) = self
            .ctx
            .store()
            .read_thread(|thread| (thread.post_id, thread.page.current));
        let post_id = post_id.ok_or(ClientError::Domain(DomainError::ValidationError(
            "no post loaded".into(),
        )))?;

        let request = CreateCommentRequest::top_level(post_id, content.clone());
        let location = match self.ctx.api().create_comment(&request).await {
            Ok(location) => location,
            Err(err) => return Err(self.fail("Failed to post comment", err.into())),
        };

        let placement = match location {
            Some(loc) if loc.page.map_or(true, |page| page == current_page) => {
                let comment = Comment::new_local(loc.comment_id, post_id, author, content);
                let appended = self.ctx.store().write_thread(|thread| {
                    if thread.is_for(post_id) {
                        thread.push_local(comment);
                        true
                    } else {
                        false
                    }
                });
                if !appended {
                    debug!("Thread changed before the comment was stored");
                }
                CommentPlacement::Appended(loc.comment_id)
            }
            Some(loc) => CommentPlacement::OnPage {
                page: loc.page.unwrap_or(current_page),
                comment_id: loc.comment_id,
            },
            None => CommentPlacement::Unplaced,
        };
        self.ctx.store().write_board(|board| {
            if let Some(post) = board.post_mut(post_id) {
                post.comment_count += 1;
            }
        });

        info!(?placement, "Comment posted");
        self.ctx.notifier().notify(Notice::success("Comment posted"));
        Ok(placement)
    }

    /// Reply under `comment_id`, optionally answering another reply.
    ///
    /// On success the replies of the top-level comment are reloaded and
    /// shown.
    #[instrument(skip(self, raw, reply_to))]
    pub async fn submit_reply(
        &self,
        comment_id: EntityId,
        raw: &str,
        reply_to: Option<ReplyTarget>,
    ) -> ClientResult<usize> {
        self.require_login()?;
        let mut content = normalize_content(raw)?;

        let post_id = self
            .ctx
            .store()
            .read_thread(|thread| thread.top_level(comment_id).map(|c| c.post_id))
            .ok_or(ClientError::TargetNotFound(TargetRef::comment(comment_id)))?;

        if let Some(target) = &reply_to {
            let prefix = reply_prefix(&target.username);
            if !content.starts_with(&prefix) {
                content.insert_str(0, &prefix);
            }
        }

        let request = CreateCommentRequest::reply(
            post_id,
            comment_id,
            reply_to.as_ref().map(|t| t.id),
            content,
        );
        if let Err(err) = self.ctx.api().create_comment(&request).await {
            return Err(self.fail("Failed to post reply", err.into()));
        }

        self.ctx.store().write_thread(|thread| {
            if let Some(comment) = thread.top_level_mut(comment_id) {
                comment.reply_count += 1;
                comment.show_replies = true;
            }
        });
        self.ctx.notifier().notify(Notice::success("Reply posted"));

        match CommentLoader::new(self.ctx).load_replies(comment_id, true).await {
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Reply stored but reloading replies failed"),
        }
        let count = self
            .ctx
            .store()
            .read_thread(|thread| thread.top_level(comment_id).map_or(0, |c| c.replies.len()));
        info!(replies = count, "Reply posted");
        Ok(count)
    }

    fn require_login(&self) -> ClientResult<sbbs_core::Author> {
        match self.ctx.session().user() {
            Some(user) => Ok(user),
            None => {
                self.ctx.notifier().login_required();
                Err(ClientError::LoginRequired)
            }
        }
    }

    fn fail(&self, fallback: &str, err: ClientError) -> ClientError {
        warn!(error = %err, "Submission failed");
        match err.remote() {
            Some(sbbs_core::RemoteError::Unauthorized) => {
                self.ctx.session().sign_out();
                self.ctx.notifier().login_required();
            }
            Some(remote) => {
                let message = remote.server_message().unwrap_or(fallback);
                self.ctx.notifier().notify(Notice::error(message));
            }
            None => self.ctx.notifier().notify(Notice::error(fallback)),
        }
        err
    }
}
