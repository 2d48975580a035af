use {
    crate::{GameOver, GameOverReason, InfiniteRamp, RestartIntent, Score, ScoreChanged, SimRng},
    balance_assets::Balance,
    bevy::prelude::*,
    boss_components::{Boss, BossPhase},
    boss_events::{BossAttacked, BossDamaged, BossDefeated, BossRespawned, FreezeBossIntent},
    charge_components::ChargeMeter,
    charge_events::{ChargeFired, ChargeGained, FeverStarted, FireChargeIntent},
    grid_components::{Board, TileColor},
    grid_events::{MoveIntent, MoveResolved, TileMerged, TileSpawned},
    heat::{HeatChanged, HeatPool},
    rand::Rng,
    states::GameState,
    unlock_states::{UnlockTiers, color_policy},
};

/// Opening spawns for a fresh board.
const OPENING_TILES: usize = 2;

/// Resolves one player move end to end: slide/cascade/merge, spawn, score,
/// charge accrual, boss damage, heat upkeep, boss countdown. The order is
/// part of the contract; no other system mutates simulation state while
/// this runs.
pub fn handle_move_intent(
    trigger: On<MoveIntent>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut board: ResMut<Board>,
    mut boss: ResMut<Boss>,
    mut heat_pool: ResMut<HeatPool>,
    mut meter: ResMut<ChargeMeter>,
    tiers: Res<UnlockTiers>,
    balance: Res<Balance>,
    mut score: ResMut<Score>,
    mut rng: ResMut<SimRng>,
    mut ramp: ResMut<InfiniteRamp>,
    mut commands: Commands,
) {
    // The state check covers frame boundaries; the phase and heat checks
    // cover intents arriving before a queued transition applies.
    if *state.get() != GameState::Running
        || boss.phase != BossPhase::Idle
        || heat_pool.is_depleted()
    {
        debug!(state = ?state.get(), phase = ?boss.phase, "move intent rejected");
        return;
    }

    let direction = trigger.event().direction;
    let policy = color_policy(boss.level, &balance.unlocks);
    let outcome = board.resolve_move(direction, &balance.grid, policy, &mut rng.0);
    if !outcome.moved {
        trace!(?direction, "move had no effect");
        commands.trigger(MoveResolved {
            moved: false,
            total_damage: 0,
            merge_count: 0,
            spawned: None,
        });
        return;
    }

    for merge in &outcome.merges {
        commands.trigger(TileMerged {
            cell: merge.cell,
            value: merge.value,
            bonus: merge.bonus,
        });
    }

    let spawned = board.spawn_tile(&balance.grid, policy, &mut rng.0);
    if let Some((cell, tile)) = spawned {
        commands.trigger(TileSpawned { cell, tile });
    }

    if outcome.score_delta > 0 {
        score.current += outcome.score_delta as u64;
        if score.current > score.best {
            score.best = score.current;
        }
        commands.trigger(ScoreChanged {
            current: score.current,
            best: score.best,
        });
    }

    if outcome.heat_recovered > 0 {
        heat_pool.recover(outcome.heat_recovered);
        commands.trigger(HeatChanged {
            current: heat_pool.current,
            max: heat_pool.max,
        });
    }

    let was_fever = meter.fever;
    let cap = tiers.charge_cap(&balance.charge);
    let units = meter.accrue(outcome.charge_progress, cap, &balance.charge);
    if units > 0 {
        for _ in 0..units {
            boss.add_turns(balance.charge.reward_turns);
        }
        debug!(units, pool = meter.pool, "charge banked");
        commands.trigger(ChargeGained { pool: meter.pool });
    }
    if meter.fever && !was_fever {
        commands.trigger(FeverStarted);
    }

    apply_boss_damage(
        outcome.total_damage,
        &mut boss,
        &mut heat_pool,
        &balance,
        &mut commands,
    );

    let combo = balance.heat.combo_recovery(outcome.merges.len());
    heat_pool.apply_turn(balance.heat.upkeep, combo);
    commands.trigger(HeatChanged {
        current: heat_pool.current,
        max: heat_pool.max,
    });

    commands.trigger(MoveResolved {
        moved: true,
        total_damage: outcome.total_damage,
        merge_count: outcome.merges.len() as u32,
        spawned: spawned.map(|(cell, _)| cell),
    });

    if heat_pool.is_depleted() {
        end_session(GameOverReason::HeatDepleted, &mut next_state, &mut commands);
        return;
    }

    if tiers.boss_aggression && boss.on_player_turn() {
        next_state.set(GameState::BossAttacking);
    }

    if boss.undefeatable {
        ramp.moves += 1;
        if ramp.moves >= balance.boss.ramp_move_period {
            ramp.moves = 0;
            boss.request_extra_damage(&balance.boss);
            debug!(extra = boss.extra_damage, "endless tier ramp");
        }
    }

    if !board.can_move() && meter.pool == 0 {
        end_session(GameOverReason::BoardLocked, &mut next_state, &mut commands);
    }
}

/// Spends the whole charge pool on one tile. The shot's damage scales with
/// the pool size; onyx targets double it, rose targets trade the double for
/// heat. Always resets the boss countdown so a cornered player buys room.
pub fn handle_fire_intent(
    trigger: On<FireChargeIntent>,
    state: Res<State<GameState>>,
    mut board: ResMut<Board>,
    mut boss: ResMut<Boss>,
    mut heat_pool: ResMut<HeatPool>,
    mut meter: ResMut<ChargeMeter>,
    balance: Res<Balance>,
    mut rng: ResMut<SimRng>,
    mut commands: Commands,
) {
    if *state.get() != GameState::Running
        || boss.phase != BossPhase::Idle
        || heat_pool.is_depleted()
    {
        debug!(state = ?state.get(), phase = ?boss.phase, "fire intent rejected");
        return;
    }

    let cell = trigger.event().cell;
    if meter.pool == 0 || board.occupied_count() <= 1 {
        debug!(pool = meter.pool, "fire intent has nothing to spend");
        return;
    }
    let Some(tile) = board.tile(cell) else {
        debug!(?cell, "no tile under the fire target");
        return;
    };

    let mut damage = tile.value * balance.charge.damage_multiplier(meter.pool);
    match tile.color {
        TileColor::Onyx => damage *= 2,
        TileColor::Rose => {
            heat_pool.recover(balance.charge.rose_fire_heat_recovery);
        }
    }
    let crit = rng.0.random_bool(balance.charge.crit_chance);
    if crit {
        damage *= 2;
    }

    board.take(cell);
    meter.consume_pool();
    heat_pool.recover(balance.charge.fire_heat_recovery);
    boss.reset_turn_count();
    info!(?cell, damage, crit, "charge weapon fired");

    commands.trigger(ChargeFired {
        cell,
        tile,
        damage,
        crit,
    });
    commands.trigger(HeatChanged {
        current: heat_pool.current,
        max: heat_pool.max,
    });
    apply_boss_damage(damage, &mut boss, &mut heat_pool, &balance, &mut commands);
}

/// Blocking attack resolution, reached through the dedicated state so no
/// player intent can interleave between trigger and damage.
pub fn resolve_boss_attack(
    mut boss: ResMut<Boss>,
    mut heat_pool: ResMut<HeatPool>,
    balance: Res<Balance>,
    board: Res<Board>,
    meter: Res<ChargeMeter>,
    mut next_state: ResMut<NextState<GameState>>,
    mut commands: Commands,
) {
    if boss.phase != BossPhase::Attacking {
        debug!("attack state without a pending attack");
        next_state.set(GameState::Running);
        return;
    }

    let damage = boss.effective_damage(&balance.boss);
    heat_pool.decrease(damage);
    boss.finish_attack(&balance.boss);
    info!(damage, heat = heat_pool.current, "boss attack resolved");
    commands.trigger(BossAttacked { damage });
    commands.trigger(HeatChanged {
        current: heat_pool.current,
        max: heat_pool.max,
    });

    if heat_pool.is_depleted() {
        end_session(GameOverReason::HeatDepleted, &mut next_state, &mut commands);
        return;
    }
    if !board.can_move() && meter.pool == 0 {
        end_session(GameOverReason::BoardLocked, &mut next_state, &mut commands);
        return;
    }
    next_state.set(GameState::Running);
}

/// Full session reset; the best score is the only survivor.
pub fn handle_restart(
    _trigger: On<RestartIntent>,
    mut next_state: ResMut<NextState<GameState>>,
    mut board: ResMut<Board>,
    mut boss: ResMut<Boss>,
    mut heat_pool: ResMut<HeatPool>,
    mut meter: ResMut<ChargeMeter>,
    mut tiers: ResMut<UnlockTiers>,
    balance: Res<Balance>,
    mut score: ResMut<Score>,
    mut ramp: ResMut<InfiniteRamp>,
    mut rng: ResMut<SimRng>,
    mut commands: Commands,
) {
    *board = Board::default();
    *boss = Boss::new(&balance.boss);
    *heat_pool = HeatPool::new(balance.heat.base_max);
    meter.reset();
    *tiers = UnlockTiers::default();
    score.current = 0;
    ramp.moves = 0;
    seed_tiles(&mut board, &boss, &balance, &mut rng, &mut commands);
    commands.trigger(ScoreChanged {
        current: score.current,
        best: score.best,
    });
    commands.trigger(HeatChanged {
        current: heat_pool.current,
        max: heat_pool.max,
    });
    next_state.set(GameState::Running);
    info!("session restarted");
}

pub fn handle_freeze(trigger: On<FreezeBossIntent>, mut boss: ResMut<Boss>) {
    boss.set_frozen(trigger.event().frozen);
    debug!(frozen = boss.frozen, "boss freeze toggled");
}

/// Seeds the opening board when entering the running state with an empty
/// board (first boot; restarts reseed inline).
pub fn seed_board(
    mut board: ResMut<Board>,
    boss: Res<Boss>,
    balance: Res<Balance>,
    mut rng: ResMut<SimRng>,
    mut commands: Commands,
) {
    if board.is_empty() {
        seed_tiles(&mut board, &boss, &balance, &mut rng, &mut commands);
    }
}

fn seed_tiles(
    board: &mut Board,
    boss: &Boss,
    balance: &Balance,
    rng: &mut SimRng,
    commands: &mut Commands,
) {
    let policy = color_policy(boss.level, &balance.unlocks);
    for _ in 0..OPENING_TILES {
        if let Some((cell, tile)) = board.spawn_tile(&balance.grid, policy, &mut rng.0) {
            commands.trigger(TileSpawned { cell, tile });
        }
    }
}

/// Damage funnel shared by merges and charge shots: applies the hit, and on
/// a defeat runs the reward/respawn sequence in place.
fn apply_boss_damage(
    amount: u32,
    boss: &mut Boss,
    heat_pool: &mut HeatPool,
    balance: &Balance,
    commands: &mut Commands,
) {
    if amount == 0 {
        return;
    }
    let hp_before = boss.hp;
    let defeated = boss.take_damage(amount);
    if boss.hp != hp_before {
        commands.trigger(BossDamaged {
            amount,
            hp_after: boss.hp,
        });
    }
    if defeated {
        commands.trigger(BossDefeated { level: boss.level });
        heat_pool.increase_max_and_refill(balance.heat.defeat_max_bonus);
        commands.trigger(HeatChanged {
            current: heat_pool.current,
            max: heat_pool.max,
        });
        boss.respawn(&balance.boss);
        info!(level = boss.level, "boss defeated, next one steps in");
        commands.trigger(BossRespawned { level: boss.level });
    }
}

fn end_session(
    reason: GameOverReason,
    next_state: &mut NextState<GameState>,
    commands: &mut Commands,
) {
    warn!(?reason, "game over");
    commands.trigger(GameOver { reason });
    next_state.set(GameState::GameOver);
}
