use {
    bevy::prelude::*,
    grid_components::{Cell, Tile},
};

pub struct ChargeEventsPlugin;

impl Plugin for ChargeEventsPlugin {
    fn build(&self, _app: &mut App) {}
}

/// Player request to fire the charge weapon at a board cell. A no-op with
/// an empty pool, a near-empty board or a vacant target cell.
#[derive(Event, Debug, Clone, Copy)]
pub struct FireChargeIntent {
    pub cell: Cell,
}

/// The meter banked one or more charge units this move.
#[derive(Event, Debug, Clone, Copy)]
pub struct ChargeGained {
    pub pool: u32,
}

/// The pool reached the fever cap.
#[derive(Event, Debug, Clone, Copy)]
pub struct FeverStarted;

/// A charge shot resolved: the target tile is gone and the pool is empty.
#[derive(Event, Debug, Clone, Copy)]
pub struct ChargeFired {
    pub cell: Cell,
    /// The tile the shot consumed.
    pub tile: Tile,
    pub damage: u32,
    pub crit: bool,
}
