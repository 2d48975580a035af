//! The simulation aggregate. Components (board, boss, heat, charge, tiers)
//! never talk to each other directly; every cross-component step runs here,
//! in a fixed order per move, and the outside world only sees the emitted
//! events and the readable resources.

mod events;
mod resources;
pub mod systems;


pub use {events::*, resources::*};

use {
    balance_assets::Balance,
    bevy::prelude::*,
    boss_components::Boss,
    boss_events::BossEventsPlugin,
    charge_components::ChargeMeter,
    charge_events::ChargeEventsPlugin,
    grid_components::Board,
    grid_events::GridEventsPlugin,
    states::GameState,
    system_schedule::TurnSet,
};

pub struct BattlePlugin;

impl Plugin for BattlePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GridEventsPlugin, BossEventsPlugin, ChargeEventsPlugin))
            .init_resource::<Balance>()
            .init_resource::<Board>()
            .init_resource::<Boss>()
            .init_resource::<ChargeMeter>()
            .init_resource::<Score>()
            .init_resource::<SimRng>()
            .init_resource::<InfiniteRamp>()
            .add_systems(OnEnter(GameState::Running), systems::seed_board)
            .add_systems(
                Update,
                systems::resolve_boss_attack
                    .run_if(in_state(GameState::BossAttacking))
                    .in_set(TurnSet::BossPhase),
            )
            .add_observer(systems::handle_move_intent)
            .add_observer(systems::handle_fire_intent)
            .add_observer(systems::handle_restart)
            .add_observer(systems::handle_freeze);
    }
}
