//! Charge-weapon meter: merge progress converts into discrete charge units,
//! pooled up to the current unlock tier's cap and spent all at once by a
//! single shot.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Reflect, Debug, Clone)]
pub struct ChargeTuning {
    /// Merge progress needed per charge unit.
    pub progress_threshold: u32,
    /// Pool cap on the half-strength tier.
    pub half_cap: u32,
    /// Pool cap on the full-strength tier.
    pub full_cap: u32,
    /// Pool size at which fever starts.
    pub fever_cap: u32,
    /// Shot damage multiplier indexed by pool size.
    pub damage_multipliers: Vec<u32>,
    /// Bonus countdown turns granted per charge unit gained.
    pub reward_turns: u32,
    /// Flat heat recovery on every shot.
    pub fire_heat_recovery: u32,
    /// Extra flat heat recovery when the shot consumes a rose tile.
    pub rose_fire_heat_recovery: u32,
    /// Chance a shot crits for double damage.
    pub crit_chance: f64,
}

impl Default for ChargeTuning {
    fn default() -> Self {
        Self {
            progress_threshold: 10,
            half_cap: 2,
            full_cap: 4,
            fever_cap: 2,
            damage_multipliers: vec![0, 1, 2, 3, 4],
            reward_turns: 2,
            fire_heat_recovery: 2,
            rose_fire_heat_recovery: 10,
            crit_chance: 0.05,
        }
    }
}

impl ChargeTuning {
    /// Multiplier for a shot fired with `pool` banked units. Pool sizes past
    /// the table reuse its last entry.
    pub fn damage_multiplier(&self, pool: u32) -> u32 {
        self.damage_multipliers
            .get(pool as usize)
            .or(self.damage_multipliers.last())
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ChargeMeter {
    pub pool: u32,
    pub progress: u32,
    pub fever: bool,
}

impl ChargeMeter {
    /// Banks merge progress, converting each full threshold into one charge
    /// unit while the pool is below `cap`. Progress always wraps by the
    /// threshold; units past the cap are lost. Returns the units gained.
    pub fn accrue(&mut self, amount: u32, cap: u32, tuning: &ChargeTuning) -> u32 {
        self.progress += amount;
        let mut gained = 0;
        while self.progress >= tuning.progress_threshold {
            self.progress -= tuning.progress_threshold;
            if self.pool < cap {
                self.pool += 1;
                gained += 1;
            }
        }
        if self.pool >= tuning.fever_cap && self.pool > 0 {
            self.fever = true;
        }
        gained
    }

    /// Empties the pool for a shot; progress carries over, fever ends.
    pub fn consume_pool(&mut self) -> u32 {
        self.fever = false;
        std::mem::take(&mut self.pool)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_wraps_into_units() {
        let tuning = ChargeTuning::default();
        let mut meter = ChargeMeter::default();
        assert_eq!(meter.accrue(9, 4, &tuning), 0);
        assert_eq!(meter.accrue(1, 4, &tuning), 1);
        assert_eq!(meter.pool, 1);
        assert_eq!(meter.progress, 0);
        assert_eq!(meter.accrue(23, 4, &tuning), 2);
        assert_eq!(meter.pool, 3);
        assert_eq!(meter.progress, 3);
    }

    #[test]
    fn pool_respects_the_tier_cap() {
        let tuning = ChargeTuning::default();
        let mut meter = ChargeMeter::default();
        assert_eq!(meter.accrue(50, 2, &tuning), 2);
        assert_eq!(meter.pool, 2);
        assert_eq!(meter.progress, 0, "excess units are lost, progress wraps");
        // locked tier banks nothing
        let mut locked = ChargeMeter::default();
        assert_eq!(locked.accrue(50, 0, &tuning), 0);
        assert_eq!(locked.pool, 0);
    }

    #[test]
    fn fever_starts_at_the_fever_cap_and_ends_on_fire() {
        let tuning = ChargeTuning::default();
        let mut meter = ChargeMeter::default();
        meter.accrue(10, 4, &tuning);
        assert!(!meter.fever);
        meter.accrue(10, 4, &tuning);
        assert!(meter.fever);
        assert_eq!(meter.consume_pool(), 2);
        assert!(!meter.fever);
        assert_eq!(meter.pool, 0);
    }

    #[test]
    fn firing_preserves_progress() {
        let tuning = ChargeTuning::default();
        let mut meter = ChargeMeter::default();
        meter.accrue(17, 4, &tuning);
        assert_eq!(meter.progress, 7);
        meter.consume_pool();
        assert_eq!(meter.progress, 7);
    }

    #[test]
    fn multiplier_table_lookup_clamps_to_last_entry() {
        let tuning = ChargeTuning::default();
        assert_eq!(tuning.damage_multiplier(0), 0);
        assert_eq!(tuning.damage_multiplier(3), 3);
        assert_eq!(tuning.damage_multiplier(4), 4);
        assert_eq!(tuning.damage_multiplier(9), 4);
    }
}
