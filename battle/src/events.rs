use bevy::prelude::*;

/// Full session reset: the only recovery path after a game over. Best
/// score survives, everything else returns to its starting state.
#[derive(Event, Debug, Clone, Copy)]
pub struct RestartIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The heat pool hit zero.
    HeatDepleted,
    /// No legal move remains and the charge pool is empty.
    BoardLocked,
}

/// Terminal for the session; fires exactly once. Further intents are
/// rejected until a restart.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameOver {
    pub reason: GameOverReason,
}

/// Score update, emitted after every scoring move.
///
/// # Observers
/// - `save_load::persist_best_score` watches the resource instead; this
///   event exists for score popups and the like.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScoreChanged {
    pub current: u64,
    pub best: u64,
}
