/// Events emitted while a turn resolves.
/// The presentation layer consumes these for narration and sound.

use crate::domain::board::Cell;
use crate::domain::rules::Direction;

#[derive(Clone, Debug)]
pub enum TurnEvent {
    DiceRolled { player: usize, face: u8, direction: Direction, on_prime: bool },
    Stepped { player: usize, to: Cell, remaining: u8 },
    LadderUsed { player: usize, from: Cell, to: Cell },
    StarCollected { player: usize, cell: Cell },
    StarAlreadyClaimed { cell: Cell },
    PointsAwarded { player: usize, cell: Cell, points: u32 },
    Landed { player: usize, cell: Cell },
    BossTriggered { player: usize, cell: Cell },
    BossWon { player: usize, points: i32, stars: i32 },
    BossLost { player: usize, points: i32, stars: i32, retreat_to: Cell },
    PlayerFinished { player: usize },
    ExtraTurn { player: usize },
    NextTurn { player: usize },
    QueueStalled,
    MatchEnded { winner: Option<usize> },
}
