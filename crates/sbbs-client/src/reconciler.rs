//! Optimistic like/dislike reconciliation
//!
//! A toggle updates the local state first, then confirms it remotely:
//!
//! 1. Claim the target so a second toggle on it is rejected while this one
//!    is pending.
//! 2. Locate the target, snapshot its reaction state and apply the
//!    optimistic change in one locked step.
//! 3. Run the remote calls (cancel the opposite reaction first when it was
//!    active) under the reaction timeout.
//! 4. Keep the optimistic state on success, settle an "already applied"
//!    conflict with a compensating cancel, and restore the snapshot on any
//!    other outcome.
//!
//! Every toggle that reaches step 3 produces exactly one notification.

use sbbs_core::{
    ReactionKind, ReactionPlan, ReactionSnapshot, ReactionState, RemoteError, RemoteResult,
    TargetRef,
};
use tracing::{debug, info, instrument, warn};

use crate::context::ClientContext;
use crate::error::{ClientError, ClientResult};
use crate::notifier::Notice;

const GENERIC_FAILURE: &str = "Operation failed, please try again later";

/// How a toggle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The reaction is now active
    Applied,
    /// The reaction is now inactive
    Cancelled,
    /// The server already held the reaction; it was withdrawn to match the
    /// local view
    SelfHealed,
}

/// Drives reaction toggles for posts, comments and replies
pub struct ReactionReconciler<'a> {
    ctx: &'a ClientContext,
}

impl<'a> ReactionReconciler<'a> {
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }

    /// Toggle `kind` on `target`
    #[instrument(skip(self), fields(target = %target))]
    pub async fn toggle(
        &self,
        target: TargetRef,
        kind: ReactionKind,
    ) -> ClientResult<ReactionOutcome> {
        if !self.ctx.session().is_authenticated() {
            self.ctx.notifier().login_required();
            return Err(ClientError::LoginRequired);
        }

        let Some(_claim) = self.ctx.in_flight().try_acquire(target) else {
            debug!("Toggle rejected, previous one still pending");
            self.ctx
                .notifier()
                .notify(Notice::warning("Please wait for the previous action to finish"));
            return Err(ClientError::ReactionInFlight(target));
        };

        let begun = self
            .ctx
            .store()
            .with_reactions(target, |state| (state.snapshot(), state.begin(kind)));
        let Some((snapshot, plan)) = begun else {
            warn!("Reaction target is not loaded");
            return Err(ClientError::TargetNotFound(target));
        };
        debug!(?plan, ?snapshot, "Optimistic change applied");

        let confirmed = tokio::time::timeout(
            self.ctx.reaction_timeout(),
            self.confirm(target, kind, plan),
        )
        .await
        .unwrap_or(Err(RemoteError::TimedOut));

        match confirmed {
            Ok(outcome) => Ok(self.accept(target, kind, &snapshot, outcome)),
            Err(err) => Err(self.roll_back(target, kind, &snapshot, err)),
        }
    }

    /// Toggle a like
    pub async fn toggle_like(&self, target: TargetRef) -> ClientResult<ReactionOutcome> {
        self.toggle(target, ReactionKind::Like).await
    }

    /// Toggle a dislike
    pub async fn toggle_dislike(&self, target: TargetRef) -> ClientResult<ReactionOutcome> {
        self.toggle(target, ReactionKind::Dislike).await
    }

    async fn confirm(
        &self,
        target: TargetRef,
        kind: ReactionKind,
        plan: ReactionPlan,
    ) -> RemoteResult<ReactionOutcome> {
        let api = self.ctx.api();
        match plan {
            ReactionPlan::Cancel => match api.cancel_reaction(target, kind).await {
                Ok(_) => Ok(ReactionOutcome::Cancelled),
                Err(err) if err.is_not_applied(kind) => {
                    debug!("Server held no reaction to cancel");
                    Ok(ReactionOutcome::Cancelled)
                }
                Err(err) => Err(err),
            },
            ReactionPlan::Apply { cancel_opposite } => {
                if cancel_opposite {
                    let opposite = kind.opposite();
                    match api.cancel_reaction(target, opposite).await {
                        Ok(_) => {}
                        Err(err) if err.is_not_applied(opposite) => {
                            debug!(%opposite, "Server held no opposite reaction");
                        }
                        Err(err) => return Err(err),
                    }
                }

                match api.react(target, kind).await {
                    Ok(_) => Ok(ReactionOutcome::Applied),
                    Err(err) if err.is_already_applied(kind) => {
                        info!("Server already held the reaction, withdrawing it");
                        api.cancel_reaction(target, kind).await?;
                        Ok(ReactionOutcome::SelfHealed)
                    }
                    Err(err) => Err(err),
                }
            }
        }
    }

    fn accept(
        &self,
        target: TargetRef,
        kind: ReactionKind,
        snapshot: &ReactionSnapshot,
        outcome: ReactionOutcome,
    ) -> ReactionOutcome {
        self.write_pending(target, kind, |state| match outcome {
            ReactionOutcome::SelfHealed => state.settle_conflict(kind, snapshot),
            ReactionOutcome::Applied | ReactionOutcome::Cancelled => state.confirm(),
        });

        let message = match (outcome, kind) {
            (ReactionOutcome::Applied, ReactionKind::Like) => "Liked",
            (ReactionOutcome::Applied, ReactionKind::Dislike) => "Disliked",
            (_, ReactionKind::Like) => "Like cancelled",
            (_, ReactionKind::Dislike) => "Dislike cancelled",
        };
        self.ctx.notifier().notify(Notice::success(message));
        info!(?outcome, "Reaction confirmed");
        outcome
    }

    fn roll_back(
        &self,
        target: TargetRef,
        kind: ReactionKind,
        snapshot: &ReactionSnapshot,
        err: RemoteError,
    ) -> ClientError {
        self.write_pending(target, kind, |state| state.rollback(snapshot));
        warn!(error = %err, "Reaction rolled back");

        if err == RemoteError::Unauthorized {
            self.ctx.session().sign_out();
            self.ctx.notifier().login_required();
        } else {
            let message = match &err {
                RemoteError::TimedOut => "The server did not respond in time",
                other => other.server_message().unwrap_or(GENERIC_FAILURE),
            };
            self.ctx.notifier().notify(Notice::error(message));
        }
        ClientError::Remote(err)
    }

    /// Settle the optimistic change, but only on the state that still holds
    /// it. A target that was evicted or reloaded from the server keeps what
    /// it has.
    fn write_pending(
        &self,
        target: TargetRef,
        kind: ReactionKind,
        settle: impl FnOnce(&mut ReactionState),
    ) {
        let written = self.ctx.store().with_reactions(target, |state| {
            if state.is_pending(kind) {
                settle(state);
                true
            } else {
                false
            }
        });
        match written {
            None => debug!("Target evicted before settling, nothing to update"),
            Some(false) => debug!("Target reloaded while pending, keeping server state"),
            Some(true) => {}
        }
    }
}
