use {
    bevy::prelude::*,
    rand::{SeedableRng, rngs::StdRng},
};

/// Session score plus the persisted best. `best` tracks `current` the
/// moment it is exceeded; only `save_load` touches disk.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Score {
    pub current: u64,
    pub best: u64,
}

/// The simulation's only randomness source. Injected so tests can pin
/// outcomes; nothing in the core reaches for a thread-local generator.
#[derive(Resource, Debug)]
pub struct SimRng(pub StdRng);

impl Default for SimRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Moves resolved since the last extra-damage request on the endless tier.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InfiniteRamp {
    pub moves: u32,
}
