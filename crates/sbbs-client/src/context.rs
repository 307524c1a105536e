//! Client context - dependency container for client operations

use std::sync::Arc;
use std::time::Duration;

use sbbs_common::ClientConfig;
use sbbs_core::dto::LoginRequest;
use sbbs_core::{Author, CommunityApi, DEFAULT_PAGE_SIZE};
use tracing::{info, instrument, warn};

use crate::error::ClientResult;
use crate::guard::RequestGuard;
use crate::http::HttpCommunityApi;
use crate::inflight::InFlight;
use crate::notifier::{Notice, Notifier, TracingNotifier};
use crate::session::{Credential, Session};
use crate::store::CommunityStore;

const DEFAULT_REACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything a client operation needs, injected once per session
#[derive(Clone)]
pub struct ClientContext {
    api: Arc<dyn CommunityApi>,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    store: Arc<CommunityStore>,
    in_flight: Arc<InFlight>,
    guard: Option<Arc<RequestGuard>>,
    reaction_timeout: Duration,
    page_size: u32,
}

impl ClientContext {
    /// Context talking HTTP to `config.api_url`
    pub fn connect(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let session = Arc::new(Session::new());
        let guard = Arc::new(RequestGuard::new(&config.guard));
        let api = HttpCommunityApi::new(config, session.clone(), guard.clone())?;

        Ok(ClientContextBuilder::new(Arc::new(api))
            .session(session)
            .guard(guard)
            .notifier(notifier)
            .reaction_timeout(config.reaction_timeout())
            .page_size(config.page_size)
            .build())
    }

    pub fn api(&self) -> &dyn CommunityApi {
        self.api.as_ref()
    }

    pub fn session(&self) -> &Session {
        self.session.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn store(&self) -> &CommunityStore {
        self.store.as_ref()
    }

    pub fn in_flight(&self) -> &Arc<InFlight> {
        &self.in_flight
    }

    /// The challenge gate, when requests go through one
    pub fn guard(&self) -> Option<&RequestGuard> {
        self.guard.as_deref()
    }

    /// Upper bound for one reaction reconciliation
    pub fn reaction_timeout(&self) -> Duration {
        self.reaction_timeout
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sign in with username and password
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Author> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.api.login(&request).await {
            Ok(response) => {
                let credential = Credential::from(response);
                let user = credential.user.clone();
                self.session.sign_in(credential);
                self.notifier.notify(Notice::success("Signed in"));
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "Login failed");
                self.notifier.notify(Notice::error(
                    err.server_message().unwrap_or("Login failed").to_string(),
                ));
                Err(err.into())
            }
        }
    }

    /// End the session and drop all loaded state
    pub fn logout(&self) {
        self.session.sign_out();
        self.store.clear();
        info!("Logged out");
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("session", &self.session)
            .field("guard", &self.guard)
            .field("reaction_timeout", &self.reaction_timeout)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Builder for creating ClientContext with custom services
pub struct ClientContextBuilder {
    api: Arc<dyn CommunityApi>,
    session: Option<Arc<Session>>,
    notifier: Option<Arc<dyn Notifier>>,
    store: Option<Arc<CommunityStore>>,
    guard: Option<Arc<RequestGuard>>,
    reaction_timeout: Duration,
    page_size: u32,
}

impl ClientContextBuilder {
    pub fn new(api: Arc<dyn CommunityApi>) -> Self {
        Self {
            api,
            session: None,
            notifier: None,
            store: None,
            guard: None,
            reaction_timeout: DEFAULT_REACTION_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn store(mut self, store: Arc<CommunityStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn guard(mut self, guard: Arc<RequestGuard>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn reaction_timeout(mut self, timeout: Duration) -> Self {
        self.reaction_timeout = timeout;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn build(self) -> ClientContext {
        ClientContext {
            api: self.api,
            session: self.session.unwrap_or_default(),
            notifier: self
                .notifier
                .unwrap_or_else(|| Arc::new(TracingNotifier)),
            store: self.store.unwrap_or_default(),
            in_flight: Arc::new(InFlight::new()),
            guard: self.guard,
            reaction_timeout: self.reaction_timeout,
            page_size: self.page_size,
        }
    }
}
