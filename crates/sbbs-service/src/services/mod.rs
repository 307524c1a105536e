//! Business logic services
//!
//! This module contains the service layer that validates requests and
//! applies board rules on top of the repositories.

pub mod auth;
pub mod comment;
pub mod context;
pub mod debounce;
pub mod error;
pub mod post;
pub mod reaction;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::{CommentService, MAX_PAGE_SIZE};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use debounce::Debouncer;
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use reaction::ReactionService;
