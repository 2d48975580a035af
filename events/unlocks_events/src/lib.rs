use {bevy::prelude::*, unlock_states::Tier};

pub struct UnlocksEventsPlugin;

impl Plugin for UnlocksEventsPlugin {
    fn build(&self, _app: &mut App) {}
}

/// A feature tier flipped on. Fires at most once per tier per session.
#[derive(Event, Debug, Clone, Copy)]
pub struct TierUnlocked {
    pub tier: Tier,
}
