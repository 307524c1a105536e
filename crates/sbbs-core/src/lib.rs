//! # sbbs-core
//!
//! Domain layer of the community board: ids, the reaction state machine,
//! client view models with their target locator, stored records, the wire
//! contract, and the ports implemented by the client and the backend.
//! This crate has zero dependencies on infrastructure (HTTP, storage, etc.).

pub mod dto;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Author, Comment, CommentThread, Located, PageInfo, Post, PostBoard, ReplyTarget,
    StoredComment, StoredPost, UserAccount, DEFAULT_PAGE_SIZE,
};
pub use error::{DomainError, RemoteError, RemoteResult, ResponseCode};
pub use traits::{
    CommentRepository, CommunityApi, NewComment, PostRepository, ReactionRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{
    EntityId, ReactionKind, ReactionPhase, ReactionPlan, ReactionSnapshot, ReactionState,
    TargetKind, TargetRef,
};
