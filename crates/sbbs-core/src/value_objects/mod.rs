//! Value objects - immutable types that represent domain concepts

mod entity_id;
mod reaction;
mod target;

pub use entity_id::{EntityId, EntityIdParseError};
pub use reaction::{
    PendingReaction, ReactionKind, ReactionPhase, ReactionPlan, ReactionSnapshot, ReactionState,
};
pub use target::{TargetKind, TargetRef};
