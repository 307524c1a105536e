//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path ids, query strings and
//! validated JSON bodies.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{IdPath, ReactionPath, ReactionVerb};
pub use query::ApiQuery;
pub use validated::ValidatedJson;
