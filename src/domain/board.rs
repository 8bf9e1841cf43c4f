/// Match-scoped board state: track geometry, boss nodes, tile points,
/// star claims, ladder links.
///
/// One BoardConfig lives for exactly one match. It is rebuilt at match
/// start (tile points re-rolled, stars unclaimed, ladders regenerated)
/// and passed explicitly to whoever needs it — no ambient state.

use std::collections::BTreeSet;

use rand::Rng;

use super::ladder::{self, LadderLink};

pub type Cell = u8;

/// Track length. Cell 1 is the start, cell BOARD_CELLS the finish.
pub const BOARD_CELLS: Cell = 64;

/// Row width of the rendered 8x8 layout; also what "horizontal ladder"
/// is measured against.
pub const BOARD_SIZE: u8 = 8;

/// Tile point value range for cells 2..=N (cell 1 always awards 0).
const TILE_POINTS_MIN: u32 = 1;
const TILE_POINTS_MAX: u32 = 10;

/// Stars sit on every multiple of this.
pub const STAR_INTERVAL: Cell = 5;

/// Validated board settings, produced by the config boundary.
/// Held by the session and consulted at every match start.
#[derive(Clone, Debug)]
pub struct BoardSettings {
    pub boss_nodes: Vec<Cell>,
    pub boss_win_points: i32,
    pub boss_win_stars: i32,
    pub boss_lose_points: i32,
    pub boss_lose_stars: i32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            boss_nodes: vec![8, 15, 23, 31, 42, 55],
            boss_win_points: 10,
            boss_win_stars: 2,
            boss_lose_points: -5,
            boss_lose_stars: -1,
        }
    }
}

/// Row index of a cell in the 8-wide row-major layout, counted from the
/// top of the board (the finish row is row 0).
pub fn row_of(cell: Cell) -> u8 {
    (BOARD_CELLS - cell) / BOARD_SIZE
}

/// (row, column-from-left) of a cell on the rendered boustrophedon grid.
/// Rows snake: even rows (from the top) run right-to-left.
pub fn grid_coords(cell: Cell) -> (u8, u8) {
    let ordinal = BOARD_CELLS - cell; // 0 for the finish cell
    let row = ordinal / BOARD_SIZE;
    let col = ordinal % BOARD_SIZE;
    if row % 2 == 0 {
        (row, BOARD_SIZE - 1 - col)
    } else {
        (row, col)
    }
}

/// Outcome of a star claim attempt on a landing cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StarAward {
    NotAStarCell,
    AlreadyClaimed,
    Awarded,
}

pub struct BoardConfig {
    pub boss_nodes: BTreeSet<Cell>,
    pub boss_win_points: i32,
    pub boss_win_stars: i32,
    pub boss_lose_points: i32,
    pub boss_lose_stars: i32,
    /// Fixed per-cell point values, index 1..=BOARD_CELLS. Index 0 unused.
    tile_points: Vec<u32>,
    /// Per-match claim bitmap, index 1..=BOARD_CELLS.
    stars_claimed: Vec<bool>,
    pub ladders: Vec<LadderLink>,
    /// Draws spent placing ladders, for the shortfall report.
    pub ladder_attempts: usize,
}

impl BoardConfig {
    /// Build the board for a fresh match: roll tile points, clear star
    /// claims, place ladders.
    pub fn new_match<R: Rng>(settings: &BoardSettings, rng: &mut R) -> Self {
        let mut tile_points = vec![0u32; BOARD_CELLS as usize + 1];
        for cell in 2..=BOARD_CELLS {
            tile_points[cell as usize] = rng.gen_range(TILE_POINTS_MIN..=TILE_POINTS_MAX);
        }

        let (ladders, ladder_attempts) = ladder::generate(rng);

        BoardConfig {
            boss_nodes: settings.boss_nodes.iter().copied().collect(),
            boss_win_points: settings.boss_win_points,
            boss_win_stars: settings.boss_win_stars,
            boss_lose_points: settings.boss_lose_points,
            boss_lose_stars: settings.boss_lose_stars,
            tile_points,
            stars_claimed: vec![false; BOARD_CELLS as usize + 1],
            ladders,
            ladder_attempts,
        }
    }

    /// Fixed point value of a cell. 0 for the start cell.
    pub fn tile_points(&self, cell: Cell) -> u32 {
        if (1..=BOARD_CELLS).contains(&cell) {
            self.tile_points[cell as usize]
        } else {
            0
        }
    }

    pub fn star_claimed(&self, cell: Cell) -> bool {
        (1..=BOARD_CELLS).contains(&cell) && self.stars_claimed[cell as usize]
    }

    /// Attempt to claim the star on a landing cell. Stars exist only on
    /// multiples of STAR_INTERVAL and are claimable once per match.
    pub fn try_claim_star(&mut self, cell: Cell) -> StarAward {
        if !(1..=BOARD_CELLS).contains(&cell) || cell % STAR_INTERVAL != 0 {
            return StarAward::NotAStarCell;
        }
        if self.stars_claimed[cell as usize] {
            return StarAward::AlreadyClaimed;
        }
        self.stars_claimed[cell as usize] = true;
        StarAward::Awarded
    }

    pub fn is_boss(&self, cell: Cell) -> bool {
        self.boss_nodes.contains(&cell)
    }

    /// First ladder whose foot is at `cell`. The generator's
    /// no-shared-endpoint rule means at most one can match.
    pub fn ladder_from(&self, cell: Cell) -> Option<LadderLink> {
        self.ladders.iter().copied().find(|l| l.from == cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn board() -> BoardConfig {
        let mut rng = SmallRng::seed_from_u64(11);
        BoardConfig::new_match(&BoardSettings::default(), &mut rng)
    }

    #[test]
    fn tile_points_fixed_and_in_range() {
        let b = board();
        assert_eq!(b.tile_points(1), 0);
        for cell in 2..=BOARD_CELLS {
            let pts = b.tile_points(cell);
            assert!((1..=10).contains(&pts), "cell {} -> {}", cell, pts);
            // repeat query: same value, never re-rolled
            assert_eq!(b.tile_points(cell), pts);
        }
    }

    #[test]
    fn star_claim_is_idempotent_per_cell() {
        let mut b = board();
        assert_eq!(b.try_claim_star(20), StarAward::Awarded);
        assert_eq!(b.try_claim_star(20), StarAward::AlreadyClaimed);
        assert!(b.star_claimed(20));
        assert!(!b.star_claimed(25));
    }

    #[test]
    fn non_star_cells_never_award() {
        let mut b = board();
        assert_eq!(b.try_claim_star(7), StarAward::NotAStarCell);
        assert_eq!(b.try_claim_star(0), StarAward::NotAStarCell);
    }

    #[test]
    fn rows_count_from_finish() {
        assert_eq!(row_of(64), 0);
        assert_eq!(row_of(57), 0);
        assert_eq!(row_of(56), 1);
        assert_eq!(row_of(1), 7);
    }

    #[test]
    fn grid_snakes_by_row() {
        // top row runs left-to-right 57..64, so 64 sits at the right edge
        assert_eq!(grid_coords(64), (0, 7));
        assert_eq!(grid_coords(57), (0, 0));
        // next row runs right-to-left
        assert_eq!(grid_coords(56), (1, 0));
        assert_eq!(grid_coords(49), (1, 7));
        // bottom row runs left-to-right again: 8 at the left edge, 1 at the right
        assert_eq!(grid_coords(8), (7, 0));
        assert_eq!(grid_coords(1), (7, 7));
    }

    #[test]
    fn default_boss_nodes_present() {
        let b = board();
        for cell in [8, 15, 23, 31, 42, 55] {
            assert!(b.is_boss(cell));
        }
        assert!(!b.is_boss(9));
    }
}
