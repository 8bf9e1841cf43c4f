/// Ladder placement: rejection sampling with geometric constraints.
///
/// A candidate link (from, to) is accepted only if all of these hold:
///   - span: to - from >= MIN_SPAN
///   - endpoints unused by every previously accepted link
///   - from and to sit in different board rows (no "horizontal" ladder)
///   - no interleaving with an accepted link (ef, et):
///     from < ef < to < et  or  ef < from < et < to  would cross on the track
///
/// Placement stops at TARGET links or when MAX_ATTEMPTS draws are spent.
/// A shortfall is reported by the caller, never treated as an error.

use std::collections::HashSet;

use rand::Rng;

use super::board::{row_of, Cell};

pub const TARGET_LADDERS: usize = 5;
pub const MAX_ATTEMPTS: usize = 2000;

/// Endpoints are drawn from [ENDPOINT_MIN, ENDPOINT_MAX]: never the start
/// row's opening cells, never the finish cell's row tail.
const ENDPOINT_MIN: Cell = 6;
const ENDPOINT_MAX: Cell = 59;
const MIN_SPAN: Cell = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LadderLink {
    pub from: Cell,
    pub to: Cell,
}

/// Draw up to TARGET_LADDERS non-conflicting links.
/// Returns (links, attempts spent).
pub fn generate<R: Rng>(rng: &mut R) -> (Vec<LadderLink>, usize) {
    let mut links: Vec<LadderLink> = Vec::with_capacity(TARGET_LADDERS);
    let mut used: HashSet<Cell> = HashSet::new();
    let mut attempts = 0;

    while links.len() < TARGET_LADDERS && attempts < MAX_ATTEMPTS {
        attempts += 1;

        let a: Cell = rng.gen_range(ENDPOINT_MIN..=ENDPOINT_MAX);
        let b: Cell = rng.gen_range(ENDPOINT_MIN..=ENDPOINT_MAX);
        if a == b {
            continue;
        }
        let from = a.min(b);
        let to = a.max(b);

        if to - from < MIN_SPAN {
            continue;
        }
        if used.contains(&from) || used.contains(&to) {
            continue;
        }
        if row_of(from) == row_of(to) {
            continue;
        }
        if conflicts(&links, from, to) {
            continue;
        }

        links.push(LadderLink { from, to });
        used.insert(from);
        used.insert(to);
    }

    (links, attempts)
}

/// Conflict check against accepted links: identical pair, interleaving
/// (crossing), or any shared endpoint (double safety on top of the
/// used-endpoint set).
fn conflicts(links: &[LadderLink], from: Cell, to: Cell) -> bool {
    for l in links {
        let (ef, et) = (l.from, l.to);
        if ef == from && et == to {
            return true;
        }
        if (from < ef && ef < to && to < et) || (ef < from && from < et && et < to) {
            return true;
        }
        if ef == from || ef == to || et == from || et == to {
            return true;
        }
    }
    false
}
