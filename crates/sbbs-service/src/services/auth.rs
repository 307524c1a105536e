//! Authentication service
//!
//! Handles account registration and login.

use sbbs_common::auth::{hash_password, verify_password};
use sbbs_common::AppError;
use sbbs_core::dto::{LoginRequest, LoginResponseDto};
use sbbs_core::UserAccount;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::mappers::user_dto;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        avatar: Option<String>,
    ) -> ServiceResult<UserAccount> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("username and password are required"));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .ctx
            .user_repo()
            .create(username, &password_hash, avatar)
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> ServiceResult<LoginResponseDto> {
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        verify_password(&request.password, &user.password_hash).inspect_err(|_| {
            warn!(user_id = %user.id, "Login failed: invalid password");
        })?;

        let token = self.ctx.jwt_service().issue(user.id, &user.username)?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponseDto {
            token,
            user: user_dto(&user),
        })
    }
}
