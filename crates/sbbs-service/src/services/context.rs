//! Service context - dependency container for services

use std::sync::Arc;

use sbbs_common::{BoardConfig, JwtService};
use sbbs_core::traits::{CommentRepository, PostRepository, ReactionRepository, UserRepository};
use sbbs_core::DEFAULT_PAGE_SIZE;

use super::debounce::Debouncer;
use super::error::{ServiceError, ServiceResult};
use crate::store::InMemoryBoard;

/// Service context containing all dependencies
///
/// Passed by reference to every service. Provides the repositories, the
/// JWT service, the reaction debouncer and the board settings.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    jwt_service: Arc<JwtService>,
    debouncer: Arc<Debouncer>,
    page_size: u32,
}

impl ServiceContext {
    /// Context backed by a single in-memory board
    pub fn in_memory(board: Arc<InMemoryBoard>, jwt_service: Arc<JwtService>, config: &BoardConfig) -> Self {
        Self {
            user_repo: board.clone(),
            post_repo: board.clone(),
            comment_repo: board.clone(),
            reaction_repo: board,
            jwt_service,
            debouncer: Arc::new(Debouncer::new(config.debounce())),
            page_size: config.page_size.max(1),
        }
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn debouncer(&self) -> &Debouncer {
        self.debouncer.as_ref()
    }

    /// Default number of top-level comments per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("debouncer", &self.debouncer)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    debouncer: Option<Debouncer>,
    page_size: Option<u32>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = Some(debouncer);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository or the JWT service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            debouncer: Arc::new(self.debouncer.unwrap_or_else(Debouncer::disabled)),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        })
    }
}
