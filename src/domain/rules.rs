/// Turn rules — pure functions, no side effects.
/// These encode "what happens next" without performing the action.
///
/// ## Ladder Fire Truth Table
///
/// Evaluated after each forward step, on the cell just reached:
/// ┌────────────────────────────────┬───────┐
/// │ Condition                       │ Fire? │
/// ├────────────────────────────────┼───────┤
/// │ turn-start cell not prime       │ NO    │
/// │ direction backward              │ NO    │
/// │ no steps remaining              │ NO    │
/// │ no ladder foot at this cell     │ NO    │
/// │ otherwise                       │ YES   │
/// └────────────────────────────────┴───────┘
///
/// The star at a teleport destination is granted only when the counter
/// is already zero on arrival; with steps remaining the teleport is a
/// free ride and stepping resumes from the destination.
///
/// ## Winner
///
/// total = score + stars * STAR_TO_POINT. Strictly greater total wins;
/// on a total tie the challenger needs strictly more stars; a full tie
/// keeps whichever player was evaluated first.

use rand::Rng;

use super::board::{BoardConfig, Cell, BOARD_CELLS};
use super::ladder::LadderLink;
use super::player::PlayerState;

/// Conversion factor from stars to points at match end.
pub const STAR_TO_POINT: i32 = 5;

/// Probability that a direction draw comes up forward.
pub const FORWARD_PROBABILITY: f64 = 0.75;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DieRoll {
    pub face: u8,
    pub direction: Direction,
}

/// One die draw: face 1..=6, mostly forward.
pub fn roll_die<R: Rng>(rng: &mut R) -> DieRoll {
    let face = rng.gen_range(1..=6);
    let direction = if rng.gen::<f64>() < FORWARD_PROBABILITY {
        Direction::Forward
    } else {
        Direction::Backward
    };
    DieRoll { face, direction }
}

/// Deterministic trial-division primality; 1 is not prime.
pub fn is_prime(n: Cell) -> bool {
    let n = n as u32;
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Next cell of an ordinary forward step, clamped at the finish.
pub fn forward_target(position: Cell) -> Cell {
    (position + 1).min(BOARD_CELLS)
}

/// Should a ladder auto-fire on the cell just stepped onto?
/// See the truth table above.
pub fn ladder_fires(
    board: &BoardConfig,
    cell: Cell,
    started_on_prime: bool,
    direction: Direction,
    remaining: u8,
) -> Option<LadderLink> {
    if !started_on_prime || direction != Direction::Forward || remaining == 0 {
        return None;
    }
    board.ladder_from(cell)
}

/// Index of the winning player, by total then star tie-break.
/// Returns None only for an empty slice.
pub fn compute_winner(players: &[PlayerState]) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_total = i32::MIN;
    for (i, p) in players.iter().enumerate() {
        let total = p.match_total();
        if total > best_total {
            best_total = total;
            best = Some(i);
        } else if total == best_total {
            if let Some(b) = best {
                if p.stars() > players[b].stars() {
                    best = Some(i);
                }
            }
        }
    }
    best
}
