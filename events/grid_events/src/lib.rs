use {
    bevy::prelude::*,
    grid_components::{Cell, Direction, MergeBonus, Tile},
};

pub struct GridEventsPlugin;

impl Plugin for GridEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Tile>()
            .register_type::<grid_components::TileColor>()
            .register_type::<Cell>()
            .register_type::<Direction>();
    }
}

/// Player move request. Rejected outside the running state.
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveIntent {
    pub direction: Direction,
}

/// One merge event inside a resolved move.
///
/// # Observers
/// Presentation only: merge VFX/SFX, with the value-change particle path
/// suppressed for onyx-pair (bonus) merges.
#[derive(Event, Debug, Clone, Copy)]
pub struct TileMerged {
    pub cell: Cell,
    pub value: u32,
    pub bonus: MergeBonus,
}

/// A new tile entered the board after an effective move.
#[derive(Event, Debug, Clone, Copy)]
pub struct TileSpawned {
    pub cell: Cell,
    pub tile: Tile,
}

/// Aggregate result of a move intent. `moved == false` means the intent
/// was a no-op: nothing slid, nothing spawned, no turn was consumed.
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveResolved {
    pub moved: bool,
    pub total_damage: u32,
    pub merge_count: u32,
    pub spawned: Option<Cell>,
}
