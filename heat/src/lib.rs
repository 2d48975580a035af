//! The heat pool: the player's shared life resource. Every move burns a
//! fixed upkeep, combos and rose merges recover some of it, boss attacks
//! bite chunks out of it, and hitting zero ends the session.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Reflect, Debug, Clone)]
pub struct HeatTuning {
    pub base_max: u32,
    /// Flat heat cost of every effective move.
    pub upkeep: u32,
    /// Recovery indexed by merge count; the last entry covers every larger
    /// combo.
    pub combo_recovery: Vec<u32>,
    /// Max-heat increase granted per boss defeat.
    pub defeat_max_bonus: u32,
}

impl Default for HeatTuning {
    fn default() -> Self {
        Self {
            base_max: 100,
            upkeep: 5,
            combo_recovery: vec![0, 2, 4, 7, 10, 14],
            defeat_max_bonus: 10,
        }
    }
}

impl HeatTuning {
    pub fn combo_recovery(&self, merge_count: usize) -> u32 {
        if self.combo_recovery.is_empty() {
            return 0;
        }
        let index = merge_count.min(self.combo_recovery.len() - 1);
        self.combo_recovery[index]
    }
}

/// Notification for observers outside the simulation; logic never depends
/// on it.
#[derive(Event, Debug, Clone, Copy)]
pub struct HeatChanged {
    pub current: u32,
    pub max: u32,
}

#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct HeatPool {
    pub current: u32,
    pub max: u32,
}

impl Default for HeatPool {
    fn default() -> Self {
        Self::new(HeatTuning::default().base_max)
    }
}

impl HeatPool {
    /// Full pool at the given maximum.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Clamped subtraction; returns the heat actually removed.
    pub fn decrease(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current);
        self.current -= applied;
        applied
    }

    /// Clamped addition; returns the heat actually restored.
    pub fn recover(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.max - self.current);
        self.current += applied;
        applied
    }

    /// Net per-move change, applied once with a single clamp: upkeep out,
    /// combo recovery in.
    pub fn apply_turn(&mut self, upkeep: u32, combo_recovery: u32) {
        if combo_recovery >= upkeep {
            self.recover(combo_recovery - upkeep);
        } else {
            self.decrease(upkeep - combo_recovery);
        }
    }

    /// Victory reward: the maximum ratchets up and the pool refills.
    pub fn increase_max_and_refill(&mut self, delta: u32) {
        self.max += delta;
        self.current = self.max;
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

pub struct HeatPlugin;

impl Plugin for HeatPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HeatPool>().init_resource::<HeatPool>();
    }
}
