//! Domain entities - board view models and stored records

mod author;
mod comment;
mod page;
mod post;
mod records;
mod thread;

pub use author::Author;
pub use comment::{Comment, ReplyTarget};
pub use page::{PageInfo, DEFAULT_PAGE_SIZE};
pub use post::{Post, PostBoard};
pub use records::{ReactionCounters, StoredComment, StoredPost, UserAccount};
pub use thread::{CommentThread, Located};
