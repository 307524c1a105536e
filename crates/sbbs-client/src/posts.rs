//! Post listing
//!
//! The listing is read in batches, newest first. Each batch continues from
//! the last post id of the previous one.

use sbbs_core::Post;
use tracing::{debug, instrument, warn};

use crate::context::ClientContext;
use crate::error::ClientResult;

pub struct PostLoader<'a> {
    ctx: &'a ClientContext,
}

impl<'a> PostLoader<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }

    /// Load the first batch, replacing the listing. Returns the number of
    /// posts listed.
    ///
    /// On failure the current listing is kept.
    #[instrument(skip(self))]
    pub async fn load_posts(&self) -> ClientResult<usize> {
        let batch = match self.ctx.api().fetch_posts(None, self.ctx.page_size()).await {
            Ok(batch) => batch,
            Err(err) => {
                warn!(error = %err, "Failed to load posts");
                return Err(err.into());
            }
        };

        let posts: Vec<Post> = batch.list.into_iter().map(Post::from).collect();
        let count = posts.len();
        self.ctx.store().write_board(|board| {
            board.replace_listing(posts, batch.last_id, batch.has_next_page);
        });
        debug!(count, has_more = batch.has_next_page, "Posts loaded");
        Ok(count)
    }

    /// Append the batch after the cursor. Returns how many new posts were
    /// added; nothing is fetched once the listing is exhausted.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> ClientResult<usize> {
        let (cursor, has_more) = self
            .ctx
            .store()
            .read_board(|board| (board.cursor, board.has_more));
        if !has_more {
            debug!("No more posts");
            return Ok(0);
        }

        let batch = match self.ctx.api().fetch_posts(cursor, self.ctx.page_size()).await {
            Ok(batch) => batch,
            Err(err) => {
                warn!(error = %err, "Failed to load more posts");
                return Err(err.into());
            }
        };

        let posts: Vec<Post> = batch.list.into_iter().map(Post::from).collect();
        let added = self.ctx.store().write_board(|board| {
            board.extend_listing(posts, batch.last_id, batch.has_next_page)
        });
        debug!(added, has_more = batch.has_next_page, "More posts loaded");
        Ok(added)
    }
}
