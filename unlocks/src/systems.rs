use {
    balance_assets::Balance,
    bevy::prelude::*,
    boss_events::BossRespawned,
    unlock_states::UnlockTiers,
    unlocks_events::TierUnlocked,
};

/// Observer for boss respawns. Flips every tier the new level has reached
/// and announces each flip exactly once.
pub fn absorb_boss_level(
    trigger: On<BossRespawned>,
    mut tiers: ResMut<UnlockTiers>,
    balance: Res<Balance>,
    mut commands: Commands,
) {
    let level = trigger.event().level;
    for tier in tiers.absorb_level(level, &balance.unlocks) {
        info!(?tier, level, "feature tier unlocked");
        commands.trigger(TierUnlocked { tier });
    }
}
