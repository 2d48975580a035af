use {
    balance_assets::{Balance, BalanceAssetsPlugin, BalanceHandle, BalanceSheet},
    battle::BattlePlugin,
    bevy::prelude::*,
    boss_components::Boss,
    heat::{HeatPlugin, HeatPool},
    save_load::SaveLoadPlugin,
    states::GameState,
    system_schedule::TurnSet,
    unlocks::UnlocksPlugin,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .configure_sets(Update, (TurnSet::BossPhase, TurnSet::Cleanup).chain())
            .add_plugins((
                BalanceAssetsPlugin,
                HeatPlugin,
                BattlePlugin,
                UnlocksPlugin,
                SaveLoadPlugin,
            ))
            .add_systems(Startup, request_balance_sheet)
            .add_systems(
                Update,
                apply_balance_sheet.run_if(in_state(GameState::Loading)),
            );
    }
}

fn request_balance_sheet(asset_server: Res<AssetServer>, mut commands: Commands) {
    commands.insert_resource(BalanceHandle(asset_server.load("ember.balance.ron")));
}

/// Waits for the sheet, then rebuilds the tuned resources and opens play.
fn apply_balance_sheet(
    handle: Res<BalanceHandle>,
    sheets: Res<Assets<BalanceSheet>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(sheet) = sheets.get(&handle.0) else {
        return;
    };
    commands.insert_resource(Balance(sheet.clone()));
    commands.insert_resource(Boss::new(&sheet.boss));
    commands.insert_resource(HeatPool::new(sheet.heat.base_max));
    info!("balance sheet applied");
    next_state.set(GameState::Running);
}
