//! Client configuration

use serde::Deserialize;
use std::env;
use std::time::Duration;

use super::app_config::env_or;

/// Settings of the board client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the board API, without trailing slash
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Upper bound for a whole reaction reconciliation
    #[serde(default = "default_reaction_timeout_ms")]
    pub reaction_timeout_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub guard: GuardConfig,
}

/// Request-rate challenge gate
#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    /// Requests allowed within one window before the challenge is shown
    #[serde(default = "default_guard_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_guard_window_ms")]
    pub window_ms: u64,
    /// How long a passed challenge exempts the client
    #[serde(default = "default_guard_immunity_secs")]
    pub immunity_secs: u64,
}

impl GuardConfig {
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    #[must_use]
    pub fn immunity(&self) -> Duration {
        Duration::from_secs(self.immunity_secs)
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_requests: default_guard_max_requests(),
            window_ms: default_guard_window_ms(),
            immunity_secs: default_guard_immunity_secs(),
        }
    }
}

impl ClientConfig {
    /// Client settings pointing at `api_url` with every other value defaulted
    #[must_use]
    pub fn for_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            request_timeout_ms: default_request_timeout_ms(),
            reaction_timeout_ms: default_reaction_timeout_ms(),
            page_size: default_page_size(),
            guard: GuardConfig::default(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config =
            Self::for_url(env::var("SBBS_API_URL").unwrap_or_else(|_| default_api_url()));
        config.request_timeout_ms = env_or("SBBS_REQUEST_TIMEOUT_MS", default_request_timeout_ms);
        config.reaction_timeout_ms =
            env_or("SBBS_REACTION_TIMEOUT_MS", default_reaction_timeout_ms);
        config.page_size = env_or("SBBS_PAGE_SIZE", default_page_size);
        config.guard = GuardConfig {
            max_requests: env_or("SBBS_GUARD_MAX_REQUESTS", default_guard_max_requests),
            window_ms: env_or("SBBS_GUARD_WINDOW_MS", default_guard_window_ms),
            immunity_secs: env_or("SBBS_GUARD_IMMUNITY_SECS", default_guard_immunity_secs),
        };
        config
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn reaction_timeout(&self) -> Duration {
        Duration::from_millis(self.reaction_timeout_ms)
    }
}

fn default_api_url() -> String {
    "http://localhost:12367".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_reaction_timeout_ms() -> u64 {
    10_000
}

fn default_page_size() -> u32 {
    sbbs_core::DEFAULT_PAGE_SIZE
}

fn default_guard_max_requests() -> u32 {
    10
}

fn default_guard_window_ms() -> u64 {
    5_000
}

fn default_guard_immunity_secs() -> u64 {
    30 * 60
}
