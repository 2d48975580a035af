//! Level-keyed feature gate. Listens for boss respawns and flips one-shot
//! tiers; everything else (what a tier means for caps and colors) lives in
//! `unlock_states` as pure functions.

pub mod systems;


use {bevy::prelude::*, unlock_states::UnlockTiers, unlocks_events::UnlocksEventsPlugin};

pub struct UnlocksPlugin;

impl Plugin for UnlocksPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(UnlocksEventsPlugin)
            .register_type::<UnlockTiers>()
            .init_resource::<UnlockTiers>()
            .add_observer(systems::absorb_boss_level);
    }
}
