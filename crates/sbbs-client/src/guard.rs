//! Request-rate challenge gate
//!
//! Counts outgoing requests against a GCRA quota. Once the quota is
//! exceeded the challenge becomes visible and every request waits until the
//! user passes it. A passed challenge exempts the client for a while.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use parking_lot::Mutex;
use sbbs_common::GuardConfig;
use sbbs_core::{RemoteError, RemoteResult};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct RequestGuard {
    limiter: DefaultDirectRateLimiter,
    immunity: Duration,
    passed_at: Mutex<Option<Instant>>,
    challenge: watch::Sender<bool>,
    device_id: String,
}

impl RequestGuard {
    pub fn new(config: &GuardConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = config.window() / burst.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::direct(quota),
            immunity: config.immunity(),
            passed_at: Mutex::new(None),
            challenge: watch::channel(false).0,
            device_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Identifier sent with every request as `X-Device-Id`
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Watch the challenge visibility
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.challenge.subscribe()
    }

    pub fn is_challenged(&self) -> bool {
        *self.challenge.borrow()
    }

    pub fn is_immune(&self) -> bool {
        self.passed_at
            .lock()
            .is_some_and(|at| at.elapsed() < self.immunity)
    }

    /// Wait until a request to `path` may be sent
    pub async fn admit(&self, path: &str) -> RemoteResult<()> {
        if self.is_immune() {
            return Ok(());
        }
        if !self.is_challenged() && self.limiter.check().is_ok() {
            return Ok(());
        }

        // Subscribe before raising so the update cannot be missed
        let mut visible = self.challenge.subscribe();
        if self.challenge.send_if_modified(|shown| !std::mem::replace(shown, true)) {
            warn!(path, "Request rate exceeded, challenge shown");
        }
        debug!(path, "Request held until the challenge is passed");

        visible
            .wait_for(|shown| !*shown)
            .await
            .map(|_| ())
            .map_err(|_| RemoteError::ChallengeFailed)
    }

    /// Mark the challenge as passed and release every held request
    pub fn pass_challenge(&self) {
        *self.passed_at.lock() = Some(Instant::now());
        self.challenge.send_replace(false);
        info!(immunity_secs = self.immunity.as_secs(), "Challenge passed");
    }

    /// Drop any immunity granted by a passed challenge
    pub fn reset(&self) {
        *self.passed_at.lock() = None;
    }
}

impl std::fmt::Debug for RequestGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGuard")
            .field("device_id", &self.device_id)
            .field("challenged", &self.is_challenged())
            .field("immune", &self.is_immune())
            .finish()
    }
}
