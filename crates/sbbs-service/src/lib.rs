//! # sbbs-service
//!
//! Application layer of the board backend: services enforcing the reaction
//! and comment rules, plus the in-memory board store.

mod mappers;
pub mod services;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    AuthService, CommentService, Debouncer, PostService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
pub use store::{seed_demo, DemoBoard, InMemoryBoard};
