use bevy::prelude::*;

pub struct BossEventsPlugin;

impl Plugin for BossEventsPlugin {
    fn build(&self, _app: &mut App) {}
}

/// Host request to suspend or resume the boss countdown. Player moves stay
/// available either way.
#[derive(Event, Debug, Clone, Copy)]
pub struct FreezeBossIntent {
    pub frozen: bool,
}

/// The boss took damage from a merge or a charge shot.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossDamaged {
    pub amount: u32,
    pub hp_after: i64,
}

/// The boss attack resolved and heat was debited.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossAttacked {
    pub damage: u32,
}

/// HP reached zero; a respawn follows immediately.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossDefeated {
    pub level: u32,
}

/// A fresh boss spawned at the given level.
///
/// # Observers
/// - `unlocks::absorb_boss_level`: flips newly reached feature tiers.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossRespawned {
    pub level: u32,
}
