//! # sbbs-client
//!
//! Client core of the community board: optimistic like/dislike
//! reconciliation, the post listing, comment paging with a reply cache,
//! comment submission,
//! and the HTTP adapter for the board API.
//!
//! Every operation takes a [`ClientContext`] carrying the injected API,
//! session, notifier and view-model store.

mod composer;
mod context;
mod error;
mod guard;
mod http;
mod inflight;
mod loader;
mod notifier;
mod posts;
mod reconciler;
mod session;
mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use composer::{normalize_content, CommentPlacement, Composer};
pub use context::{ClientContext, ClientContextBuilder};
pub use error::{ClientError, ClientResult};
pub use guard::RequestGuard;
pub use http::{HttpCommunityApi, DEVICE_ID_HEADER};
pub use inflight::{InFlight, InFlightGuard};
pub use loader::{CommentLoader, RepliesOutcome};
pub use notifier::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use posts::PostLoader;
pub use reconciler::{ReactionOutcome, ReactionReconciler};
pub use session::{Credential, Session};
pub use store::CommunityStore;
