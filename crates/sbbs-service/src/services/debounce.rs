//! Per-user debounce of repeated operations

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sbbs_core::{EntityId, TargetRef};
use std::time::{Duration, Instant};

use super::error::{ServiceError, ServiceResult};

type DebounceKey = (EntityId, &'static str, TargetRef);

/// Rejects the same (user, operation, target) arriving within `window`
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_seen: DashMap<DebounceKey, Instant>,
}

impl Debouncer {
    /// Prune stale entries once the table grows past this size
    const PRUNE_THRESHOLD: usize = 4096;

    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: DashMap::new(),
        }
    }

    /// A debouncer that admits everything
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Record an attempt, failing if the previous identical one is too recent
    pub fn check(
        &self,
        user_id: EntityId,
        operation: &'static str,
        target: TargetRef,
    ) -> ServiceResult<()> {
        if self.window.is_zero() {
            return Ok(());
        }

        let now = Instant::now();
        match self.last_seen.entry((user_id, operation, target)) {
            Entry::Occupied(mut seen) => {
                if now.duration_since(*seen.get()) < self.window {
                    return Err(ServiceError::TooFrequent);
                }
                seen.insert(now);
            }
            Entry::Vacant(slot) => {
                slot.insert(now);
            }
        }

        if self.last_seen.len() > Self::PRUNE_THRESHOLD {
            let window = self.window;
            self.last_seen
                .retain(|_, seen| now.duration_since(*seen) < window);
        }
        Ok(())
    }
}
