//! Session management
//!
//! Holds the bearer credential and the signed-in user. The session is
//! created empty, filled by `sign_in` after a successful login and emptied
//! by `sign_out` on logout, on an authentication failure, or at session end.

use parking_lot::RwLock;
use sbbs_core::dto::LoginResponseDto;
use sbbs_core::Author;

/// Bearer token plus the user it belongs to
#[derive(Clone)]
pub struct Credential {
    pub token: String,
    pub user: Author,
}

impl Credential {
    pub fn new(token: impl Into<String>, user: Author) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

impl From<LoginResponseDto> for Credential {
    fn from(response: LoginResponseDto) -> Self {
        Self::new(response.token, response.user.into())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[redacted]")
            .field("user", &self.user)
            .finish()
    }
}

/// The client's authentication state
#[derive(Debug, Default)]
pub struct Session {
    credential: RwLock<Option<Credential>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with an existing credential
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }

    pub fn sign_in(&self, credential: Credential) {
        tracing::info!(user_id = %credential.user.id, "Session started");
        *self.credential.write() = Some(credential);
    }

    /// End the session. Returns whether one was active.
    pub fn sign_out(&self) -> bool {
        let previous = self.credential.write().take();
        if let Some(credential) = &previous {
            tracing::info!(user_id = %credential.user.id, "Session ended");
        }
        previous.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.read().is_some()
    }

    /// Bearer token for the next request
    pub fn token(&self) -> Option<String> {
        self.credential.read().as_ref().map(|c| c.token.clone())
    }

    pub fn user(&self) -> Option<Author> {
        self.credential.read().as_ref().map(|c| c.user.clone())
    }
}
