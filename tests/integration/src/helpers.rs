//! Test helpers for integration tests
//!
//! Spawns an in-process server on an ephemeral port, seeded with the demo
//! board, and builds clients pointed at it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use sbbs_api::{create_app, create_app_state, AppState};
use sbbs_client::{ClientContext, RecordingNotifier};
use sbbs_common::{
    AppConfig, AppSettings, BoardConfig, ClientConfig, CorsConfig, Environment, GuardConfig,
    JwtConfig, RateLimitConfig, ServerConfig,
};
use sbbs_core::dto::Envelope;
use sbbs_service::{seed_demo, DemoBoard};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: AppState,
    pub demo: DemoBoard,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server over a freshly seeded board
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(mut config: AppConfig) -> Result<Self> {
        // Seeded here rather than at startup so the ids are known
        config.board.seed_demo = false;
        let state = create_app_state(config).await?;
        let demo = seed_demo(state.service_context())
            .await
            .map_err(|e| anyhow::anyhow!("seed failed: {e}"))?;

        let app = create_app(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            demo,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Board client talking to this server, recording its notices
    pub fn client_context(&self) -> Result<(ClientContext, Arc<RecordingNotifier>)> {
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = ClientContext::connect(&client_config(&self.base_url()), notifier.clone())?;
        Ok((ctx, notifier))
    }

    /// Board client already signed in as `username`
    pub async fn signed_in_client(
        &self,
        username: &str,
    ) -> Result<(ClientContext, Arc<RecordingNotifier>)> {
        let (ctx, notifier) = self.client_context()?;
        ctx.login(username, sbbs_service::store::DEMO_PASSWORD).await?;
        notifier.clear();
        Ok((ctx, notifier))
    }

    /// Bearer token for a demo account
    pub async fn token_for(&self, username: &str) -> Result<String> {
        let response = self
            .post(
                "/v1/auth/login",
                &serde_json::json!({
                    "username": username,
                    "password": sbbs_service::store::DEMO_PASSWORD,
                }),
            )
            .await?;
        let body: serde_json::Value = assert_json(response, StatusCode::OK).await?;
        body["data"]["token"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("login response without token: {body}"))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }
}

/// Configuration for an isolated test server: no debounce, a rate limit
/// the tests never reach
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "sbbs-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            token_expiry: 3600,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        board: BoardConfig {
            page_size: 15,
            debounce_ms: 0,
            seed_demo: false,
        },
    }
}

/// Client settings for `base_url` with a challenge gate the tests never trip
pub fn client_config(base_url: &str) -> ClientConfig {
    let mut config = ClientConfig::for_url(base_url);
    config.reaction_timeout_ms = 5_000;
    config.guard = GuardConfig {
        max_requests: 10_000,
        window_ms: 1_000,
        immunity_secs: 60,
    };
    config
}

/// Assert response status and parse the envelope
pub async fn assert_envelope<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<Envelope<T>> {
    assert_json(response, expected_status).await
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
