//! Client-side state shared by the reconciler, the loader and the composer
//!
//! Locks are held only inside the closures passed to the accessors, never
//! across an `.await`.

use parking_lot::RwLock;
use sbbs_core::{CommentThread, PostBoard, ReactionState, TargetKind, TargetRef};

#[derive(Debug, Default)]
pub struct CommunityStore {
    board: RwLock<PostBoard>,
    thread: RwLock<CommentThread>,
}

impl CommunityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_board<R>(&self, f: impl FnOnce(&PostBoard) -> R) -> R {
        f(&self.board.read())
    }

    pub fn write_board<R>(&self, f: impl FnOnce(&mut PostBoard) -> R) -> R {
        f(&mut self.board.write())
    }

    pub fn read_thread<R>(&self, f: impl FnOnce(&CommentThread) -> R) -> R {
        f(&self.thread.read())
    }

    pub fn write_thread<R>(&self, f: impl FnOnce(&mut CommentThread) -> R) -> R {
        f(&mut self.thread.write())
    }

    /// Swap in a freshly loaded thread
    pub fn replace_thread(&self, thread: CommentThread) {
        *self.thread.write() = thread;
    }

    /// Run `f` on the reaction state of a loaded target.
    ///
    /// Posts are searched on the board; comments and replies in the thread.
    /// Returns `None` when the target is not loaded.
    pub fn with_reactions<R>(
        &self,
        target: TargetRef,
        f: impl FnOnce(&mut ReactionState) -> R,
    ) -> Option<R> {
        match target.kind {
            TargetKind::Post => self
                .board
                .write()
                .post_mut(target.id)
                .map(|post| f(&mut post.reactions)),
            TargetKind::Comment => self
                .thread
                .write()
                .locate_mut(target.id)
                .map(|located| f(&mut located.comment.reactions)),
        }
    }

    /// Copy of a target's reaction state
    pub fn reactions(&self, target: TargetRef) -> Option<ReactionState> {
        match target.kind {
            TargetKind::Post => self
                .board
                .read()
                .post(target.id)
                .map(|post| post.reactions.clone()),
            TargetKind::Comment => self
                .thread
                .read()
                .locate(target.id)
                .map(|comment| comment.reactions.clone()),
        }
    }

    /// Drop everything loaded
    pub fn clear(&self) {
        self.board.write().clear();
        let mut thread = self.thread.write();
        thread.clear();
        thread.post_id = None;
    }
}
