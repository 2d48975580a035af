//! Gameplay tuning as a RON asset. The shipped `assets/balance.ron` mirrors
//! every `Default` impl, so tests and headless runs work without asset I/O
//! while the data file stays the single knob for balancing.

use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    boss_components::BossTuning,
    charge_components::ChargeTuning,
    grid_components::GridTuning,
    heat::HeatTuning,
    serde::{Deserialize, Serialize},
    unlock_states::UnlockTuning,
};

pub struct BalanceAssetsPlugin;

impl Plugin for BalanceAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<BalanceSheet>::new(&["balance.ron"]));
    }
}

#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub grid: GridTuning,
    pub heat: HeatTuning,
    pub boss: BossTuning,
    pub charge: ChargeTuning,
    pub unlocks: UnlockTuning,
}

/// The applied copy of the loaded sheet, read by every simulation system.
#[derive(Resource, Debug, Clone, Default)]
pub struct Balance(pub BalanceSheet);

impl std::ops::Deref for Balance {
    type Target = BalanceSheet;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Handle keeping the sheet alive while it loads.
#[derive(Resource, Debug, Default)]
pub struct BalanceHandle(pub Handle<BalanceSheet>);
