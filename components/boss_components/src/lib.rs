//! Boss stat block and its turn-countdown / attack / respawn machine.
//!
//! The boss loops forever: each defeat respawns it one level higher with
//! recomputed stats. From the sentinel level on, max HP is pinned to a
//! fixed large constant; one level later the boss stops taking damage at
//! all and the session shifts to the endless tier.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// HP value used for the practically-unbeatable levels.
pub const HP_SENTINEL: i64 = 2_147_483_647;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossPhase {
    /// Counting down toward the next attack.
    #[default]
    Idle,
    /// Attack triggered, damage not yet applied.
    Attacking,
    /// Defeated, waiting for respawn.
    Transitioning,
}

#[derive(Serialize, Deserialize, Reflect, Debug, Clone)]
pub struct BossTuning {
    pub base_hp: i64,
    /// Per-level HP growth coefficient for the exponential curve.
    pub hp_per_level: f64,
    /// From this level on, max HP is pinned to the sentinel.
    pub sentinel_level: u32,
    /// From this level on, the boss ignores damage entirely.
    pub undefeatable_level: u32,
    pub base_interval: i32,
    pub min_interval: i32,
    pub base_damage: u32,
    /// Per-level damage grows linearly up to this, then slows to +1 per 5 levels.
    pub damage_soft_cap: u32,
    /// Hard cap on effective attack damage, extra damage included.
    pub attack_damage_cap: u32,
    /// Resolved moves between extra-damage requests on the endless tier.
    pub ramp_move_period: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            base_hp: 30,
            hp_per_level: 20.0,
            sentinel_level: 39,
            undefeatable_level: 40,
            base_interval: 8,
            min_interval: 3,
            base_damage: 4,
            damage_soft_cap: 10,
            attack_damage_cap: 30,
            ramp_move_period: 20,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Boss {
    pub level: u32,
    pub hp: i64,
    pub max_hp: i64,
    pub turn_interval: i32,
    /// Countdown to the next attack. Clamped at 0 while bonus turns drain.
    pub turn_count: i32,
    pub bonus_turns_added: u32,
    pub bonus_turns_filled: u32,
    pub base_damage: u32,
    /// Endless-tier ramp damage, on top of the recomputed base.
    pub extra_damage: u32,
    pub frozen: bool,
    pub undefeatable: bool,
    pub phase: BossPhase,
    /// Extra-damage requests that arrived mid-attack, drained on resolution.
    pending_extra: u32,
}

impl Default for Boss {
    fn default() -> Self {
        Self::new(&BossTuning::default())
    }
}

impl Boss {
    pub fn new(tuning: &BossTuning) -> Self {
        Self::at_level(1, tuning)
    }

    /// Boss with freshly computed stats for the given level.
    pub fn at_level(level: u32, tuning: &BossTuning) -> Self {
        let mut boss = Self {
            level,
            hp: 0,
            max_hp: 0,
            turn_interval: 0,
            turn_count: 0,
            bonus_turns_added: 0,
            bonus_turns_filled: 0,
            base_damage: 0,
            extra_damage: 0,
            frozen: false,
            undefeatable: false,
            phase: BossPhase::Idle,
            pending_extra: 0,
        };
        boss.recompute_stats(tuning);
        boss
    }

    fn recompute_stats(&mut self, tuning: &BossTuning) {
        self.max_hp = if self.level >= tuning.sentinel_level {
            HP_SENTINEL
        } else {
            let growth = (1.5f64.powi(self.level as i32 - 1) - 1.0) / 0.5;
            tuning.base_hp + (tuning.hp_per_level * growth).round() as i64
        };
        self.hp = self.max_hp;
        self.undefeatable = self.level >= tuning.undefeatable_level;
        let interval_drop = ((self.level - 1) as f64 * 0.2).floor() as i32;
        self.turn_interval = (tuning.base_interval - interval_drop).max(tuning.min_interval);
        self.turn_count = self.turn_interval;
        self.bonus_turns_added = 0;
        self.bonus_turns_filled = 0;
        let linear = tuning.base_damage + (self.level - 1);
        self.base_damage = if linear <= tuning.damage_soft_cap {
            linear
        } else {
            let knee = tuning.damage_soft_cap - tuning.base_damage + 1;
            tuning.damage_soft_cap + (self.level - knee) / 5
        };
        self.extra_damage = 0;
    }

    /// Saturating damage application. Inert while respawning or on the
    /// undefeatable tier. Returns true when this hit defeated the boss.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.phase == BossPhase::Transitioning || self.undefeatable {
            return false;
        }
        self.hp = (self.hp - amount as i64).max(0);
        if self.hp == 0 {
            self.phase = BossPhase::Transitioning;
            return true;
        }
        false
    }

    /// Advances the countdown by one player turn. Bonus turns are only
    /// consumed once the base countdown is exhausted. Returns true when the
    /// attack triggers.
    pub fn on_player_turn(&mut self) -> bool {
        if self.frozen || self.phase != BossPhase::Idle {
            return false;
        }
        self.turn_count -= 1;
        if self.turn_count < 0 && self.bonus_turns_filled < self.bonus_turns_added {
            self.turn_count = 0;
            self.bonus_turns_filled += 1;
        }
        if self.turn_count <= 0 && self.bonus_turns_filled >= self.bonus_turns_added {
            self.phase = BossPhase::Attacking;
            return true;
        }
        false
    }

    /// Countdown extension granted when the player banks a charge unit.
    /// Applies regardless of the frozen flag.
    pub fn add_turns(&mut self, turns: u32) {
        self.turn_count += turns as i32;
        self.bonus_turns_added += turns;
        self.bonus_turns_filled = 0;
    }

    /// Countdown reset granted when the charge weapon fires. Bonus counters
    /// are left untouched.
    pub fn reset_turn_count(&mut self) {
        self.turn_count = self.turn_interval;
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn effective_damage(&self, tuning: &BossTuning) -> u32 {
        (self.base_damage + self.extra_damage).min(tuning.attack_damage_cap)
    }

    /// Closes the attacking phase: resets the countdown and bonus window,
    /// then applies any extra-damage request deferred during the attack.
    pub fn finish_attack(&mut self, tuning: &BossTuning) {
        self.turn_count = self.turn_interval;
        self.bonus_turns_added = 0;
        self.bonus_turns_filled = 0;
        self.phase = BossPhase::Idle;
        let pending = std::mem::take(&mut self.pending_extra);
        for _ in 0..pending {
            self.grow_extra_damage(tuning);
        }
    }

    /// Endless-tier ramp request. Deferred while an attack resolves, never
    /// dropped.
    pub fn request_extra_damage(&mut self, tuning: &BossTuning) {
        if self.phase == BossPhase::Attacking {
            self.pending_extra += 1;
        } else {
            self.grow_extra_damage(tuning);
        }
    }

    fn grow_extra_damage(&mut self, tuning: &BossTuning) {
        if self.base_damage + self.extra_damage < tuning.attack_damage_cap {
            self.extra_damage += 1;
        }
    }

    /// Defeat -> next level with recomputed stats.
    pub fn respawn(&mut self, tuning: &BossTuning) {
        self.level += 1;
        self.phase = BossPhase::Idle;
        self.pending_extra = 0;
        self.recompute_stats(tuning);
    }
}
