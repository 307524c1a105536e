//! Per-target in-flight registry

use dashmap::DashMap;
use sbbs_core::TargetRef;
use std::sync::Arc;

/// Targets with a reconciliation in progress
#[derive(Debug, Default)]
pub struct InFlight {
    targets: DashMap<TargetRef, ()>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `target`; `None` if it is already claimed.
    /// The claim is released when the guard drops.
    pub fn try_acquire(self: &Arc<Self>, target: TargetRef) -> Option<InFlightGuard> {
        match self.targets.entry(target) {
            dashmap::mapref::entry::Entry::Occupied(_) => None,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlightGuard {
                    registry: Arc::clone(self),
                    target,
                })
            }
        }
    }

    pub fn is_in_flight(&self, target: TargetRef) -> bool {
        self.targets.contains_key(&target)
    }
}

#[must_use = "the target is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<InFlight>,
    target: TargetRef,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.targets.remove(&self.target);
    }
}
