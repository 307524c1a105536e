//! Like/dislike state of an interaction target
//!
//! `ReactionState` owns the optimistic transitions used by the client
//! reconciler. All transitions keep two invariants:
//! - `liked` and `disliked` are never both set
//! - counts never go below zero

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two mutually exclusive reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// The reaction that is cleared when this one is applied
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    /// Endpoint verb applying this reaction
    pub const fn apply_verb(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// Endpoint verb cancelling this reaction
    pub const fn cancel_verb(self) -> &'static str {
        match self {
            Self::Like => "cancelLike",
            Self::Dislike => "cancelDislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.apply_verb())
    }
}

/// Copy of the observable reaction fields taken before an optimistic change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionSnapshot {
    pub liked: bool,
    pub disliked: bool,
    pub like_count: u32,
    pub dislike_count: u32,
}

impl ReactionSnapshot {
    pub fn count(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Like => self.like_count,
            ReactionKind::Dislike => self.dislike_count,
        }
    }

    pub fn is_active(&self, kind: ReactionKind) -> bool {
        match kind {
            ReactionKind::Like => self.liked,
            ReactionKind::Dislike => self.disliked,
        }
    }
}

/// Remote work needed to confirm an optimistic change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionPlan {
    /// Apply the reaction, cancelling the opposite first when it was active
    Apply { cancel_opposite: bool },
    /// Cancel the active reaction
    Cancel,
}

/// Marker for an unconfirmed optimistic change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReaction {
    pub kind: ReactionKind,
    pub plan: ReactionPlan,
}

/// Per-kind view of the reaction state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionPhase {
    Neutral,
    Active,
    PendingApply,
    PendingCancel,
}

/// Reaction flags and counters of a post or comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionState {
    pub liked: bool,
    pub disliked: bool,
    pub like_count: u32,
    pub dislike_count: u32,
    #[serde(skip)]
    pending: Option<PendingReaction>,
}

impl ReactionState {
    /// Build a state from server data. A payload claiming both reactions
    /// keeps the like.
    pub fn new(liked: bool, disliked: bool, like_count: u32, dislike_count: u32) -> Self {
        Self {
            liked,
            disliked: disliked && !liked,
            like_count,
            dislike_count,
            pending: None,
        }
    }

    pub fn is_active(&self, kind: ReactionKind) -> bool {
        match kind {
            ReactionKind::Like => self.liked,
            ReactionKind::Dislike => self.disliked,
        }
    }

    pub fn count(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Like => self.like_count,
            ReactionKind::Dislike => self.dislike_count,
        }
    }

    pub fn pending(&self) -> Option<PendingReaction> {
        self.pending
    }

    /// Whether an unconfirmed toggle of `kind` is still held by this state.
    /// A state rebuilt from server data never is.
    pub fn is_pending(&self, kind: ReactionKind) -> bool {
        matches!(self.pending, Some(PendingReaction { kind: k, .. }) if k == kind)
    }

    pub fn snapshot(&self) -> ReactionSnapshot {
        ReactionSnapshot {
            liked: self.liked,
            disliked: self.disliked,
            like_count: self.like_count,
            dislike_count: self.dislike_count,
        }
    }

    /// Current phase of `kind`
    pub fn phase(&self, kind: ReactionKind) -> ReactionPhase {
        match self.pending {
            Some(PendingReaction { kind: k, plan }) if k == kind => match plan {
                ReactionPlan::Apply { .. } => ReactionPhase::PendingApply,
                ReactionPlan::Cancel => ReactionPhase::PendingCancel,
            },
            _ if self.is_active(kind) => ReactionPhase::Active,
            _ => ReactionPhase::Neutral,
        }
    }

    /// Apply the optimistic change for a toggle of `kind` and return the
    /// remote work that confirms it.
    pub fn begin(&mut self, kind: ReactionKind) -> ReactionPlan {
        let plan = if self.is_active(kind) {
            self.set(kind, false);
            ReactionPlan::Cancel
        } else {
            let opposite = kind.opposite();
            let cancel_opposite = self.is_active(opposite);
            if cancel_opposite {
                self.set(opposite, false);
            }
            self.set(kind, true);
            ReactionPlan::Apply { cancel_opposite }
        };
        self.pending = Some(PendingReaction { kind, plan });
        plan
    }

    /// Keep the optimistic state
    pub fn confirm(&mut self) {
        self.pending = None;
    }

    /// Restore the exact pre-change state
    pub fn rollback(&mut self, snapshot: &ReactionSnapshot) {
        self.liked = snapshot.liked;
        self.disliked = snapshot.disliked;
        self.like_count = snapshot.like_count;
        self.dislike_count = snapshot.dislike_count;
        self.pending = None;
    }

    /// Settle an "already applied" conflict after the compensating cancel
    /// succeeded. The count is derived from the snapshot so the optimistic
    /// increment is never decremented twice.
    pub fn settle_conflict(&mut self, kind: ReactionKind, snapshot: &ReactionSnapshot) {
        let count = snapshot.count(kind).saturating_sub(1);
        match kind {
            ReactionKind::Like => {
                self.liked = false;
                self.like_count = count;
            }
            ReactionKind::Dislike => {
                self.disliked = false;
                self.dislike_count = count;
            }
        }
        self.pending = None;
    }

    fn set(&mut self, kind: ReactionKind, active: bool) {
        let (flag, count) = match kind {
            ReactionKind::Like => (&mut self.liked, &mut self.like_count),
            ReactionKind::Dislike => (&mut self.disliked, &mut self.dislike_count),
        };
        if *flag == active {
            return;
        }
        *flag = active;
        *count = if active {
            count.saturating_add(1)
        } else {
            count.saturating_sub(1)
        };
    }
}
