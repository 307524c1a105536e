//! Ports - traits implemented by infrastructure

mod api;
mod repositories;

pub use api::CommunityApi;
pub use repositories::{
    CommentRepository, NewComment, PostRepository, ReactionRepository, RepoResult, UserRepository,
};
