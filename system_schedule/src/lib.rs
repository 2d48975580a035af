use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TurnSet {
    /// Blocking boss attack resolution.
    BossPhase,
    /// End-of-turn bookkeeping (persistence flushes).
    Cleanup,
}
