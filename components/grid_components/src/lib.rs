//! The merge board: a fixed 4x4 grid of numbered, colored tiles and the
//! slide/merge resolution that turns a directional move into damage, heat
//! recovery, score and charge progress.
//!
//! Resolution intentionally re-runs the whole pass whenever a pass produced
//! a merge, so a single move can cascade past the classic one-merge-per-tile
//! rule. The combo recovery table leans on that.

use {
    bevy::prelude::*,
    rand::{Rng, rngs::StdRng},
    serde::{Deserialize, Serialize},
};

pub const BOARD_SIZE: usize = 4;

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileColor {
    Onyx,
    Rose,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub value: u32,
    pub color: TileColor,
}

/// Board coordinate, `x` column and `y` row, both in `0..BOARD_SIZE`.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Cells ordered nearest-destination-first along the move axis, so each
    /// tile settles before the tiles behind it are considered.
    fn traversal(self) -> Vec<Cell> {
        let range = |rev: bool| -> Vec<usize> {
            if rev {
                (0..BOARD_SIZE).rev().collect()
            } else {
                (0..BOARD_SIZE).collect()
            }
        };
        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        match self {
            Direction::Left | Direction::Right => {
                for y in 0..BOARD_SIZE {
                    for x in range(self == Direction::Right) {
                        cells.push(Cell::new(x, y));
                    }
                }
            }
            Direction::Up | Direction::Down => {
                for x in 0..BOARD_SIZE {
                    for y in range(self == Direction::Down) {
                        cells.push(Cell::new(x, y));
                    }
                }
            }
        }
        cells
    }
}

/// How new tile colors are picked. Derived from the boss level by the
/// unlock gate; the board itself never inspects progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPolicy {
    AlwaysOnyx,
    AlwaysRose,
    Random,
}

impl ColorPolicy {
    pub fn pick(self, rng: &mut StdRng) -> TileColor {
        match self {
            ColorPolicy::AlwaysOnyx => TileColor::Onyx,
            ColorPolicy::AlwaysRose => TileColor::Rose,
            ColorPolicy::Random => {
                if rng.random_bool(0.5) {
                    TileColor::Onyx
                } else {
                    TileColor::Rose
                }
            }
        }
    }
}

/// Which color pairing produced a merge. Onyx pairs add bonus damage and
/// suppress the value-change particle path downstream, Rose pairs heal the
/// heat pool, mixed pairs double score and accrue extra charge progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeBonus {
    Onyx,
    Rose,
    Mixed,
}

impl MergeBonus {
    fn of(a: TileColor, b: TileColor) -> Self {
        match (a, b) {
            (TileColor::Onyx, TileColor::Onyx) => MergeBonus::Onyx,
            (TileColor::Rose, TileColor::Rose) => MergeBonus::Rose,
            _ => MergeBonus::Mixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    /// Cell the merged tile ended up in.
    pub cell: Cell,
    /// Doubled value of the merged tile.
    pub value: u32,
    pub bonus: MergeBonus,
}

/// Everything a resolved move feeds back into the battle: merge events plus
/// the damage/heal/score/charge totals derived from them.
#[derive(Debug, Clone, Default)]
pub struct MoveOutcome {
    pub moved: bool,
    pub merges: Vec<MergeRecord>,
    pub total_damage: u32,
    pub heat_recovered: u32,
    pub score_delta: u32,
    pub charge_progress: u32,
}

#[derive(Serialize, Deserialize, Reflect, Debug, Clone)]
pub struct GridTuning {
    /// Chance a spawned tile is a 4 instead of a 2.
    pub four_spawn_chance: f64,
    /// Onyx pair merges deal value * this as damage.
    pub onyx_damage_multiplier: u32,
    /// Rose pair merges heal round(value * 0.1) * (this - 1).
    pub rose_heal_multiplier: u32,
    /// Charge progress for a same-color merge.
    pub same_color_charge: u32,
    /// Charge progress for a mixed merge.
    pub mixed_charge: u32,
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            four_spawn_chance: 0.1,
            onyx_damage_multiplier: 2,
            rose_heal_multiplier: 3,
            same_color_charge: 1,
            mixed_charge: 3,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.cells[cell.y][cell.x]
    }

    pub fn set_tile(&mut self, cell: Cell, tile: Tile) {
        self.cells[cell.y][cell.x] = Some(tile);
    }

    pub fn take(&mut self, cell: Cell) -> Option<Tile> {
        self.cells[cell.y][cell.x].take()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|t| t.is_some()).count()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, t)| t.map(|tile| (Cell::new(x, y), tile)))
        })
    }

    fn empty_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter_map(move |(x, t)| t.is_none().then_some(Cell::new(x, y)))
            })
            .collect()
    }

    /// True iff some tile can still slide or merge: an empty cell exists or
    /// a right/down neighbor pair holds equal values.
    pub fn can_move(&self) -> bool {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let Some(tile) = self.cells[y][x] else {
                    return true;
                };
                if x + 1 < BOARD_SIZE
                    && self.cells[y][x + 1].is_some_and(|t| t.value == tile.value)
                {
                    return true;
                }
                if y + 1 < BOARD_SIZE
                    && self.cells[y + 1][x].is_some_and(|t| t.value == tile.value)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Resolves a directional move: slide-and-merge passes repeat from
    /// scratch until a pass produces no merge, then the outcome totals are
    /// derived from the accumulated merge records.
    pub fn resolve_move(
        &mut self,
        direction: Direction,
        tuning: &GridTuning,
        policy: ColorPolicy,
        rng: &mut StdRng,
    ) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        loop {
            let (pass_moved, pass_merges) = self.slide_pass(direction, policy, rng);
            outcome.moved |= pass_moved || !pass_merges.is_empty();
            let done = pass_merges.is_empty();
            outcome.merges.extend(pass_merges);
            if done {
                break;
            }
        }
        for merge in &outcome.merges {
            outcome.score_delta += match merge.bonus {
                MergeBonus::Mixed => merge.value * 2,
                _ => merge.value,
            };
            outcome.total_damage += merge.value;
            outcome.charge_progress += match merge.bonus {
                MergeBonus::Mixed => tuning.mixed_charge,
                _ => tuning.same_color_charge,
            };
            match merge.bonus {
                MergeBonus::Onyx => {
                    outcome.total_damage +=
                        merge.value * (tuning.onyx_damage_multiplier.saturating_sub(1));
                }
                MergeBonus::Rose => {
                    let tithe = (merge.value as f64 * 0.1).round() as u32;
                    outcome.heat_recovered +=
                        tithe * (tuning.rose_heal_multiplier.saturating_sub(1));
                }
                MergeBonus::Mixed => {}
            }
        }
        outcome
    }

    /// One slide-and-merge pass. Each merged cell accepts at most one merge
    /// per pass; a third equal tile stops against it instead.
    fn slide_pass(
        &mut self,
        direction: Direction,
        policy: ColorPolicy,
        rng: &mut StdRng,
    ) -> (bool, Vec<MergeRecord>) {
        let (dx, dy) = direction.delta();
        let mut merged = [[false; BOARD_SIZE]; BOARD_SIZE];
        let mut merges = Vec::new();
        let mut moved = false;

        for cell in direction.traversal() {
            let Some(tile) = self.cells[cell.y][cell.x] else {
                continue;
            };
            let (mut tx, mut ty) = (cell.x as i32, cell.y as i32);
            let mut merge_into = None;
            loop {
                let (nx, ny) = (tx + dx, ty + dy);
                if nx < 0 || ny < 0 || nx as usize >= BOARD_SIZE || ny as usize >= BOARD_SIZE {
                    break;
                }
                let (nxu, nyu) = (nx as usize, ny as usize);
                match self.cells[nyu][nxu] {
                    None => {
                        tx = nx;
                        ty = ny;
                    }
                    Some(other) => {
                        if other.value == tile.value && !merged[nyu][nxu] {
                            merge_into = Some((Cell::new(nxu, nyu), other));
                        }
                        break;
                    }
                }
            }

            if let Some((target, other)) = merge_into {
                self.cells[cell.y][cell.x] = None;
                let value = tile.value * 2;
                self.cells[target.y][target.x] = Some(Tile {
                    value,
                    color: policy.pick(rng),
                });
                merged[target.y][target.x] = true;
                merges.push(MergeRecord {
                    cell: target,
                    value,
                    bonus: MergeBonus::of(tile.color, other.color),
                });
            } else if (tx, ty) != (cell.x as i32, cell.y as i32) {
                self.cells[cell.y][cell.x] = None;
                self.cells[ty as usize][tx as usize] = Some(tile);
                moved = true;
            }
        }
        (moved, merges)
    }

    /// Places one new tile in a uniformly random empty cell: a 2, or a 4
    /// with the tuned chance. Returns `None` on a full board.
    pub fn spawn_tile(
        &mut self,
        tuning: &GridTuning,
        policy: ColorPolicy,
        rng: &mut StdRng,
    ) -> Option<(Cell, Tile)> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let cell = empty[rng.random_range(0..empty.len())];
        let tile = Tile {
            value: if rng.random_bool(tuning.four_spawn_chance) {
                4
            } else {
                2
            },
            color: policy.pick(rng),
        };
        self.cells[cell.y][cell.x] = Some(tile);
        Some((cell, tile))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rand::SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn onyx(value: u32) -> Tile {
        Tile {
            value,
            color: TileColor::Onyx,
        }
    }

    fn rose(value: u32) -> Tile {
        Tile {
            value,
            color: TileColor::Rose,
        }
    }

    #[test]
    fn adjacent_pair_merges_once() {
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 0), onyx(2));
        board.set_tile(Cell::new(1, 0), onyx(2));
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysOnyx,
            &mut rng(),
        );
        assert!(outcome.moved);
        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(outcome.charge_progress, 1);
        assert_eq!(board.tile(Cell::new(0, 0)), Some(onyx(4)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn onyx_pair_deals_bonus_damage() {
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 0), onyx(4));
        board.set_tile(Cell::new(3, 0), onyx(4));
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysOnyx,
            &mut rng(),
        );
        // value 8 doubled by the onyx multiplier
        assert_eq!(outcome.total_damage, 16);
        assert_eq!(outcome.heat_recovered, 0);
    }

    #[test]
    fn rose_pair_heals_instead_of_bonus_damage() {
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 0), rose(8));
        board.set_tile(Cell::new(1, 0), rose(8));
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysRose,
            &mut rng(),
        );
        assert_eq!(outcome.total_damage, 16);
        // round(16 * 0.1) = 2, times (3 - 1)
        assert_eq!(outcome.heat_recovered, 4);
    }

    #[test]
    fn mixed_pair_doubles_score_and_charge() {
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 0), onyx(2));
        board.set_tile(Cell::new(1, 0), rose(2));
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysOnyx,
            &mut rng(),
        );
        assert_eq!(outcome.merges[0].bonus, MergeBonus::Mixed);
        assert_eq!(outcome.score_delta, 8);
        assert_eq!(outcome.charge_progress, 3);
        assert_eq!(outcome.total_damage, 4);
    }

    #[test]
    fn pass_merges_at_most_once_per_cell() {
        // 2 2 4 _ sliding left: the pair becomes a 4 which must NOT absorb
        // the third tile in the same pass; the follow-up pass merges them.
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 0), onyx(2));
        board.set_tile(Cell::new(1, 0), onyx(2));
        board.set_tile(Cell::new(2, 0), onyx(4));
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysOnyx,
            &mut rng(),
        );
        // cascade: 2+2 -> 4, then 4+4 -> 8 on the repeated pass
        assert_eq!(outcome.merges.len(), 2);
        assert_eq!(board.tile(Cell::new(0, 0)), Some(onyx(8)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn cascade_repeats_until_no_merge() {
        // 2 2 2 2 -> two 4s in pass one -> one 8 in pass two.
        let mut board = Board::default();
        for x in 0..4 {
            board.set_tile(Cell::new(x, 0), onyx(2));
        }
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysOnyx,
            &mut rng(),
        );
        assert_eq!(outcome.merges.len(), 3);
        assert_eq!(board.tile(Cell::new(0, 0)), Some(onyx(8)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn blocked_move_is_a_noop() {
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 0), onyx(2));
        board.set_tile(Cell::new(1, 0), onyx(4));
        let before = board.clone();
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysOnyx,
            &mut rng(),
        );
        assert!(!outcome.moved);
        assert!(outcome.merges.is_empty());
        assert_eq!(board.tile(Cell::new(0, 0)), before.tile(Cell::new(0, 0)));
        assert_eq!(board.tile(Cell::new(1, 0)), before.tile(Cell::new(1, 0)));
    }

    #[test]
    fn tile_count_is_conserved_by_merges_and_spawn() {
        let mut rng = rng();
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 1), onyx(2));
        board.set_tile(Cell::new(2, 1), onyx(2));
        board.set_tile(Cell::new(3, 3), onyx(8));
        let before = board.occupied_count();
        let outcome = board.resolve_move(
            Direction::Left,
            &GridTuning::default(),
            ColorPolicy::AlwaysOnyx,
            &mut rng,
        );
        assert!(outcome.moved);
        board
            .spawn_tile(&GridTuning::default(), ColorPolicy::AlwaysOnyx, &mut rng)
            .unwrap();
        assert_eq!(board.occupied_count(), before - outcome.merges.len() + 1);
    }

    #[test]
    fn can_move_detects_locked_and_open_boards() {
        let mut board = Board::default();
        assert!(board.can_move());
        // checkerboard of unequal values locks the board
        let mut value = 2;
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                board.set_tile(Cell::new(x, y), onyx(value));
                value = if value == 2 { 4 } else { 2 };
            }
            value = if value == 2 { 4 } else { 2 };
        }
        assert!(!board.can_move());
        // equalizing one neighbor pair unlocks it
        board.set_tile(Cell::new(1, 0), onyx(2));
        assert!(board.can_move());
    }

    #[test]
    fn spawn_fills_a_random_empty_cell() {
        let mut rng = rng();
        let mut board = Board::default();
        board.set_tile(Cell::new(0, 0), onyx(2));
        let (cell, tile) = board
            .spawn_tile(&GridTuning::default(), ColorPolicy::AlwaysRose, &mut rng)
            .unwrap();
        assert_ne!(cell, Cell::new(0, 0));
        assert!(tile.value == 2 || tile.value == 4);
        assert_eq!(tile.color, TileColor::Rose);
        assert_eq!(board.tiles().count(), 2);
        assert!(board.tiles().any(|(c, t)| c == cell && t == tile));
    }
}
