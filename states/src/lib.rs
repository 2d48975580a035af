use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Waiting for the balance sheet asset.
    #[default]
    Loading,
    /// Accepting move and fire intents.
    Running,
    /// A boss attack is resolving; intents are rejected until it finishes.
    BossAttacking,
    /// Terminal until a restart intent arrives.
    GameOver,
}
