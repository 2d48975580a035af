//! One-shot feature tiers keyed on boss level, and the tile color policy
//! derived from the same level. Each flag flips false -> true exactly once
//! per session and only a full restart clears them.

use {
    bevy::prelude::*,
    charge_components::ChargeTuning,
    grid_components::ColorPolicy,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    BossAggression,
    ChargeWeapon,
    FullCharge,
}

#[derive(Serialize, Deserialize, Reflect, Debug, Clone)]
pub struct UnlockTuning {
    /// Boss level at which attacks go live.
    pub aggression_level: u32,
    /// Boss level at which the charge weapon unlocks at half strength.
    pub charge_level: u32,
    /// Boss level at which the charge pool cap rises to full strength.
    pub full_charge_level: u32,
    /// Levels below this spawn only onyx tiles.
    pub rose_policy_level: u32,
    /// Levels from this one on spawn random colors.
    pub random_policy_level: u32,
}

impl Default for UnlockTuning {
    fn default() -> Self {
        Self {
            aggression_level: 3,
            charge_level: 5,
            full_charge_level: 7,
            rose_policy_level: 3,
            random_policy_level: 5,
        }
    }
}

#[derive(Resource, Reflect, Debug, Clone, Default)]
#[reflect(Resource, Default)]
pub struct UnlockTiers {
    pub boss_aggression: bool,
    pub charge_weapon: bool,
    pub full_charge: bool,
}

impl UnlockTiers {
    /// Flips every tier the given boss level has reached, returning the ones
    /// that flipped just now. Already-unlocked tiers never fire again.
    pub fn absorb_level(&mut self, level: u32, tuning: &UnlockTuning) -> Vec<Tier> {
        let mut flipped = Vec::new();
        if !self.boss_aggression && level >= tuning.aggression_level {
            self.boss_aggression = true;
            flipped.push(Tier::BossAggression);
        }
        if !self.charge_weapon && level >= tuning.charge_level {
            self.charge_weapon = true;
            flipped.push(Tier::ChargeWeapon);
        }
        if !self.full_charge && level >= tuning.full_charge_level {
            self.full_charge = true;
            flipped.push(Tier::FullCharge);
        }
        flipped
    }

    /// Charge pool cap for the current tier: 0 while locked, the half cap
    /// until full strength unlocks.
    pub fn charge_cap(&self, tuning: &ChargeTuning) -> u32 {
        if self.full_charge {
            tuning.full_cap
        } else if self.charge_weapon {
            tuning.half_cap
        } else {
            0
        }
    }
}

/// Tile color policy as a pure function of the boss level.
pub fn color_policy(level: u32, tuning: &UnlockTuning) -> ColorPolicy {
    if level < tuning.rose_policy_level {
        ColorPolicy::AlwaysOnyx
    } else if level < tuning.random_policy_level {
        ColorPolicy::AlwaysRose
    } else {
        ColorPolicy::Random
    }
}
