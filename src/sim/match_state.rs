/// MatchState: the complete state of one running match.
///
/// Built at match start, discarded at match end. The board, the player
/// list, the turn queue and the per-turn state machine all live here;
/// nothing about a match is ambient. The RNG is owned by the match so
/// tests can seed it.

use std::collections::VecDeque;

use rand::rngs::SmallRng;

use crate::config::PacingConfig;
use crate::domain::board::{BoardConfig, BoardSettings, Cell};
use crate::domain::boss::Challenge;
use crate::domain::player::PlayerState;
use crate::domain::rules::{Direction, DieRoll};

/// The resumable movement continuation: everything a paused walk needs
/// to carry across teleports and pacing ticks.
#[derive(Clone, Debug)]
pub struct Walk {
    pub direction: Direction,
    pub remaining: u8,
    /// Whether the mover began this turn on a prime cell — fixed for
    /// the whole walk, not re-evaluated mid-path.
    pub started_on_prime: bool,
    /// Set when a star is claimed at a teleport arrival that ends the walk.
    pub extra_turn: bool,
    /// Ticks until the next step fires.
    pub cooldown: u32,
}

/// Per-turn state machine:
/// AwaitingRoll -> Rolling -> Moving -> [Teleporting] -> (landing)
/// -> [Boss] -> AwaitingRoll | Ended | Stalled.
#[derive(Clone, Debug)]
pub enum TurnState {
    AwaitingRoll,
    /// Dice spin animation; the outcome is already drawn.
    Rolling { ticks_left: u32, roll: DieRoll },
    Moving(Walk),
    /// Cosmetic hold at a ladder arrival before stepping resumes.
    Teleporting { walk: Walk, hold: u32 },
    /// Suspended on the boss prompt; the UI owns the deadline.
    Boss { challenge: Challenge, landed: Cell, extra_turn: bool },
    Ended { winner: Option<usize> },
    /// The active queue drained without a match-end condition.
    /// Terminal; surfaced to the player, no recovery.
    Stalled,
}

pub struct MatchState {
    pub board: BoardConfig,
    pub players: Vec<PlayerState>,
    /// FIFO of active player indices; the current player is not in it.
    pub queue: VecDeque<usize>,
    pub current: Option<usize>,
    pub turn: TurnState,
    /// Last completed die roll, for the dice display.
    pub last_roll: Option<DieRoll>,
    pub pacing: PacingConfig,
    pub rng: SmallRng,
    pub tick: u64,
}

impl MatchState {
    /// Build a fresh match: new board (tile points, stars, ladders),
    /// players reset to the start cell, queue in seating order.
    pub fn new(
        names: &[String],
        settings: &BoardSettings,
        pacing: PacingConfig,
        mut rng: SmallRng,
    ) -> Self {
        let board = BoardConfig::new_match(settings, &mut rng);
        let players: Vec<PlayerState> = names
            .iter()
            .enumerate()
            .map(|(i, name)| PlayerState::new(name, i))
            .collect();

        let mut queue: VecDeque<usize> = (0..players.len()).collect();
        let current = queue.pop_front();

        MatchState {
            board,
            players,
            queue,
            current,
            turn: TurnState::AwaitingRoll,
            last_roll: None,
            pacing,
            rng,
            tick: 0,
        }
    }

    pub fn current_player(&self) -> Option<&PlayerState> {
        self.current.map(|i| &self.players[i])
    }

    /// Pop queue entries until an unfinished player surfaces.
    /// Finished players are discarded, never requeued.
    pub fn next_active(&mut self) -> Option<usize> {
        while let Some(i) = self.queue.pop_front() {
            if !self.players[i].finished {
                return Some(i);
            }
        }
        None
    }

    pub fn is_over(&self) -> bool {
        matches!(self.turn, TurnState::Ended { .. })
    }
}
