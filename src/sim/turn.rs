/// The turn engine: advances the match by one tick.
///
/// Processing order inside a turn:
///   1. Dice spin countdown, then walk start
///   2. Movement resolution, one cell per paced step
///      (forward pushes history; backward replays it)
///   3. Ladder teleport (prime-gated), with its own arrival awards
///   4. Landing resolution on the final cell (star, tile points)
///   5. Boss suspension, resolved by the prompt outcome
///   6. Finish / extra-turn / rotation / match-end
///
/// All entry points are guarded by the TurnState: a roll requested while
/// a turn is in flight is ignored, a boss outcome is accepted only while
/// suspended on the prompt. Positions never leave [1, BOARD_CELLS].

use std::mem;

use crate::domain::board::{Cell, StarAward, BOARD_CELLS};
use crate::domain::boss::{self, BossAnswer};
use crate::domain::rules::{self, Direction, DieRoll};
use super::event::TurnEvent;
use super::match_state::{MatchState, TurnState, Walk};

// ══════════════════════════════════════════════════════════════
// Roll intake
// ══════════════════════════════════════════════════════════════

/// Draw a die and start the spin. Ignored unless a player is waiting
/// to roll — this is the in-flight guard.
pub fn request_roll(m: &mut MatchState) -> Vec<TurnEvent> {
    if !matches!(m.turn, TurnState::AwaitingRoll) || m.current.is_none() {
        return vec![];
    }
    let roll = rules::roll_die(&mut m.rng);
    start_roll(m, roll)
}

/// Start the spin with a predetermined roll. Split from request_roll so
/// tests can drive exact rolls.
pub fn start_roll(m: &mut MatchState, roll: DieRoll) -> Vec<TurnEvent> {
    if !matches!(m.turn, TurnState::AwaitingRoll) || m.current.is_none() {
        return vec![];
    }
    m.turn = TurnState::Rolling { ticks_left: m.pacing.roll_spin_ticks, roll };
    vec![]
}

// ══════════════════════════════════════════════════════════════
// Tick
// ══════════════════════════════════════════════════════════════

pub fn tick(m: &mut MatchState) -> Vec<TurnEvent> {
    m.tick += 1;
    let mut events = Vec::new();

    let state = mem::replace(&mut m.turn, TurnState::AwaitingRoll);
    match state {
        TurnState::Rolling { ticks_left, roll } => {
            if ticks_left > 0 {
                m.turn = TurnState::Rolling { ticks_left: ticks_left - 1, roll };
            } else {
                begin_walk(m, roll, &mut events);
            }
        }
        TurnState::Moving(walk) => {
            advance_walk(m, walk, &mut events);
        }
        TurnState::Teleporting { walk, hold } => {
            if hold > 0 {
                m.turn = TurnState::Teleporting { walk, hold: hold - 1 };
            } else if walk.remaining > 0 {
                m.turn = TurnState::Moving(Walk { cooldown: m.pacing.step_ticks, ..walk });
            } else {
                // Unreachable under the remaining > 0 fire gate; kept so
                // the state machine is total.
                let cell = m.current.map(|i| m.players[i].position).unwrap_or(1);
                land(m, cell, walk.extra_turn, &mut events);
            }
        }
        other => {
            // AwaitingRoll, Boss, Ended, Stalled: nothing ticks.
            m.turn = other;
        }
    }

    events
}

fn begin_walk(m: &mut MatchState, roll: DieRoll, events: &mut Vec<TurnEvent>) {
    let Some(cur) = m.current else {
        return;
    };
    let position = m.players[cur].position;
    let on_prime = rules::is_prime(position);

    m.last_roll = Some(roll);
    events.push(TurnEvent::DiceRolled {
        player: cur,
        face: roll.face,
        direction: roll.direction,
        on_prime,
    });

    m.turn = TurnState::Moving(Walk {
        direction: roll.direction,
        remaining: roll.face,
        started_on_prime: on_prime,
        extra_turn: false,
        cooldown: m.pacing.step_ticks,
    });
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn advance_walk(m: &mut MatchState, mut walk: Walk, events: &mut Vec<TurnEvent>) {
    if walk.cooldown > 0 {
        walk.cooldown -= 1;
        m.turn = TurnState::Moving(walk);
        return;
    }
    let Some(cur) = m.current else {
        return;
    };

    match walk.direction {
        Direction::Forward => {
            let to = rules::forward_target(m.players[cur].position);
            m.players[cur].position = to;
            m.players[cur].history.push(to);
            walk.remaining -= 1;
            events.push(TurnEvent::Stepped { player: cur, to, remaining: walk.remaining });

            // Reaching the finish ends the walk regardless of steps left.
            if to == BOARD_CELLS {
                land(m, to, walk.extra_turn, events);
                return;
            }

            if let Some(link) =
                rules::ladder_fires(&m.board, to, walk.started_on_prime, walk.direction, walk.remaining)
            {
                teleport(m, cur, link.to, &mut walk, events);
                m.turn = TurnState::Teleporting { walk, hold: m.pacing.teleport_hold_ticks };
                return;
            }

            if walk.remaining == 0 {
                land(m, to, walk.extra_turn, events);
            } else {
                walk.cooldown = m.pacing.step_ticks;
                m.turn = TurnState::Moving(walk);
            }
        }
        Direction::Backward => {
            match m.players[cur].history.pop() {
                Some(cell) => {
                    m.players[cur].position = cell;
                    walk.remaining -= 1;
                    events.push(TurnEvent::Stepped { player: cur, to: cell, remaining: walk.remaining });
                    if walk.remaining == 0 {
                        land(m, cell, walk.extra_turn, events);
                    } else {
                        walk.cooldown = m.pacing.step_ticks;
                        m.turn = TurnState::Moving(walk);
                    }
                }
                None => {
                    // History exhausted: truncate the walk and resolve
                    // where the player stands.
                    let cell = m.players[cur].position;
                    land(m, cell, walk.extra_turn, events);
                }
            }
        }
    }
}

/// Ladder arrival: move, record, award. Tile points always; the star
/// only when the triggering step was the last one.
fn teleport(m: &mut MatchState, cur: usize, dest: Cell, walk: &mut Walk, events: &mut Vec<TurnEvent>) {
    let from = m.players[cur].position;
    m.players[cur].position = dest;
    m.players[cur].history.push(dest);
    events.push(TurnEvent::LadderUsed { player: cur, from, to: dest });

    if walk.remaining == 0 {
        match m.board.try_claim_star(dest) {
            StarAward::Awarded => {
                m.players[cur].add_stars(1);
                walk.extra_turn = true;
                events.push(TurnEvent::StarCollected { player: cur, cell: dest });
            }
            StarAward::AlreadyClaimed => {
                events.push(TurnEvent::StarAlreadyClaimed { cell: dest });
            }
            StarAward::NotAStarCell => {}
        }
    }

    let pts = m.board.tile_points(dest);
    if pts > 0 {
        m.players[cur].add_score(pts as i32);
        events.push(TurnEvent::PointsAwarded { player: cur, cell: dest, points: pts });
    }
}

// ══════════════════════════════════════════════════════════════
// Landing resolution
// ══════════════════════════════════════════════════════════════

fn land(m: &mut MatchState, cell: Cell, mut extra_turn: bool, events: &mut Vec<TurnEvent>) {
    let Some(cur) = m.current else {
        return;
    };
    events.push(TurnEvent::Landed { player: cur, cell });

    match m.board.try_claim_star(cell) {
        StarAward::Awarded => {
            m.players[cur].add_stars(1);
            extra_turn = true;
            events.push(TurnEvent::StarCollected { player: cur, cell });
        }
        StarAward::AlreadyClaimed => {
            events.push(TurnEvent::StarAlreadyClaimed { cell });
        }
        StarAward::NotAStarCell => {}
    }

    let pts = m.board.tile_points(cell);
    if pts > 0 {
        m.players[cur].add_score(pts as i32);
        events.push(TurnEvent::PointsAwarded { player: cur, cell, points: pts });
    }

    // Boss check: final resting cell only, never cells passed through.
    if m.board.is_boss(cell) {
        let challenge = boss::generate(&mut m.rng);
        events.push(TurnEvent::BossTriggered { player: cur, cell });
        m.turn = TurnState::Boss { challenge, landed: cell, extra_turn };
        return;
    }

    finish_turn(m, cell, extra_turn, events);
}

// ══════════════════════════════════════════════════════════════
// Boss resolution
// ══════════════════════════════════════════════════════════════

/// Apply the prompt outcome to a suspended boss encounter.
/// Ignored unless the turn is actually suspended.
pub fn resolve_boss(m: &mut MatchState, outcome: BossAnswer) -> Vec<TurnEvent> {
    let mut events = Vec::new();

    let state = mem::replace(&mut m.turn, TurnState::AwaitingRoll);
    let (challenge, landed, extra_turn) = match state {
        TurnState::Boss { challenge, landed, extra_turn } => (challenge, landed, extra_turn),
        other => {
            m.turn = other;
            return events;
        }
    };
    let Some(cur) = m.current else {
        return events;
    };

    if challenge.grade(&outcome) {
        m.players[cur].add_score(m.board.boss_win_points);
        // one star unit at a time, each clamped
        for _ in 0..m.board.boss_win_stars.max(0) {
            m.players[cur].add_stars(1);
        }
        events.push(TurnEvent::BossWon {
            player: cur,
            points: m.board.boss_win_points,
            stars: m.board.boss_win_stars,
        });
        finish_turn(m, landed, extra_turn, &mut events);
    } else {
        m.players[cur].add_score(m.board.boss_lose_points);
        m.players[cur].add_stars(m.board.boss_lose_stars);
        let retreat = landed.saturating_sub(1).max(1);
        m.players[cur].position = retreat;
        events.push(TurnEvent::BossLost {
            player: cur,
            points: m.board.boss_lose_points,
            stars: m.board.boss_lose_stars,
            retreat_to: retreat,
        });

        // Failure ends the turn unconditionally: rotate, overriding any
        // star-driven extra turn from the same landing.
        m.queue.push_back(cur);
        rotate(m, &mut events);
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Turn completion
// ══════════════════════════════════════════════════════════════

fn finish_turn(m: &mut MatchState, cell: Cell, extra_turn: bool, events: &mut Vec<TurnEvent>) {
    let Some(cur) = m.current else {
        return;
    };

    if cell == BOARD_CELLS {
        m.players[cur].finished = true;
        events.push(TurnEvent::PlayerFinished { player: cur });

        let not_finished = m.players.iter().filter(|p| !p.finished).count();
        if not_finished <= 1 {
            // Early termination: at most one player still racing.
            let winner = rules::compute_winner(&m.players);
            m.current = None;
            m.turn = TurnState::Ended { winner };
            events.push(TurnEvent::MatchEnded { winner });
            return;
        }

        // The finisher is not requeued.
        rotate(m, events);
        return;
    }

    if extra_turn {
        events.push(TurnEvent::ExtraTurn { player: cur });
        m.turn = TurnState::AwaitingRoll;
        return;
    }

    m.queue.push_back(cur);
    rotate(m, events);
}

/// Hand the turn to the next active player, or stall if none remain.
fn rotate(m: &mut MatchState, events: &mut Vec<TurnEvent>) {
    match m.next_active() {
        Some(next) => {
            m.current = Some(next);
            m.turn = TurnState::AwaitingRoll;
            events.push(TurnEvent::NextTurn { player: next });
        }
        None => {
            m.current = None;
            m.turn = TurnState::Stalled;
            events.push(TurnEvent::QueueStalled);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::config::PacingConfig;
    use crate::domain::board::BoardSettings;
    use crate::domain::ladder::LadderLink;

    fn instant_pacing() -> PacingConfig {
        PacingConfig {
            tick_rate_ms: 1,
            roll_spin_ticks: 0,
            step_ticks: 0,
            teleport_hold_ticks: 0,
        }
    }

    fn match_of(n: usize) -> MatchState {
        let names: Vec<String> = (0..n).map(|i| format!("P{}", i + 1)).collect();
        let mut m = MatchState::new(
            &names,
            &BoardSettings::default(),
            instant_pacing(),
            SmallRng::seed_from_u64(99),
        );
        m.board.ladders.clear();
        m
    }

    fn roll(face: u8, direction: Direction) -> DieRoll {
        DieRoll { face, direction }
    }

    /// Tick until the walk settles on a stable state, collecting events.
    fn run(m: &mut MatchState) -> Vec<TurnEvent> {
        let mut events = Vec::new();
        for _ in 0..10_000 {
            events.extend(tick(m));
            match m.turn {
                TurnState::AwaitingRoll
                | TurnState::Boss { .. }
                | TurnState::Ended { .. }
                | TurnState::Stalled => return events,
                _ => {}
            }
        }
        panic!("walk never settled");
    }

    fn play(m: &mut MatchState, r: DieRoll) -> Vec<TurnEvent> {
        let mut events = start_roll(m, r);
        events.extend(run(m));
        events
    }

    /// Place a player mid-match with a consistent history top.
    fn place(m: &mut MatchState, idx: usize, cell: u8) {
        m.players[idx].position = cell;
        m.players[idx].history.push(cell);
    }

    #[test]
    fn worked_scenario_prime_ladder_ride() {
        // Start at prime 7, ladder (9, 20), roll 3 forward.
        // Path: 7 -> 8 -> 9 (ladder fires) -> 20 -> 21.
        let mut m = match_of(2);
        m.board.ladders = vec![LadderLink { from: 9, to: 20 }];
        m.board.boss_nodes.clear();
        place(&mut m, 0, 7);
        let score_before = m.players[0].score();

        let events = play(&mut m, roll(3, Direction::Forward));

        assert_eq!(m.players[0].position, 21);
        assert!(events.iter().any(|e| matches!(e, TurnEvent::LadderUsed { from: 9, to: 20, .. })));
        // tile points awarded at the teleport stop and at the landing
        let pts_20 = m.board.tile_points(20);
        let pts_21 = m.board.tile_points(21);
        assert_eq!(m.players[0].score(), score_before + pts_20 + pts_21);
        // star at 20 NOT awarded: steps remained at arrival
        assert_eq!(m.players[0].stars(), 0);
        assert!(!m.board.star_claimed(20));
        // turn rotated to the second player
        assert_eq!(m.current, Some(1));
    }

    #[test]
    fn non_prime_start_never_teleports() {
        // Same path from 8 (not prime): 8 -> 9 -> 10 -> 11, no ladder.
        let mut m = match_of(2);
        m.board.ladders = vec![LadderLink { from: 9, to: 20 }];
        m.board.boss_nodes.clear();
        place(&mut m, 0, 8);

        let events = play(&mut m, roll(3, Direction::Forward));

        assert_eq!(m.players[0].position, 11);
        assert!(!events.iter().any(|e| matches!(e, TurnEvent::LadderUsed { .. })));
    }

    #[test]
    fn backward_replays_history_exactly() {
        // Forward ride pushes 8, 9, 20, 21; two backward steps from 21
        // pop back to 20 then 9 — descending the ladder taken earlier.
        let mut m = match_of(2);
        m.board.ladders = vec![LadderLink { from: 9, to: 20 }];
        m.board.boss_nodes.clear();
        place(&mut m, 0, 7);
        play(&mut m, roll(3, Direction::Forward));

        // hand the turn back to player 0
        while m.current != Some(0) {
            play(&mut m, roll(1, Direction::Forward));
        }

        let events = play(&mut m, roll(2, Direction::Backward));
        assert_eq!(m.players[0].position, 9);
        let steps: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                TurnEvent::Stepped { player: 0, to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(steps, vec![20, 9]);
    }

    #[test]
    fn backward_truncates_at_history_seed() {
        // Fresh player at 1 with only the seed entry: a backward roll
        // moves nothing and resolves in place.
        let mut m = match_of(2);
        m.board.boss_nodes.clear();

        let events = play(&mut m, roll(4, Direction::Backward));
        assert_eq!(m.players[0].position, 1);
        assert!(events.iter().any(|e| matches!(e, TurnEvent::Landed { cell: 1, .. })));
        assert!(!events.iter().any(|e| matches!(e, TurnEvent::Stepped { .. })));
    }

    #[test]
    fn backward_partial_truncation() {
        let mut m = match_of(2);
        m.board.boss_nodes.clear();
        // walk 2 forward from the start, then ask for 5 back
        play(&mut m, roll(2, Direction::Forward));
        while m.current != Some(0) {
            play(&mut m, roll(1, Direction::Forward));
        }
        play(&mut m, roll(5, Direction::Backward));
        assert_eq!(m.players[0].position, 1);
    }

    #[test]
    fn star_award_is_once_per_match_but_points_repeat() {
        let mut m = match_of(2);
        m.board.boss_nodes.clear();
        place(&mut m, 0, 3);
        place(&mut m, 1, 3);

        // player 0 lands on 5: star + points + extra turn
        let events = play(&mut m, roll(2, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::StarCollected { cell: 5, .. })));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::ExtraTurn { player: 0 })));
        assert_eq!(m.players[0].stars(), 1);
        assert_eq!(m.current, Some(0));

        // move player 0 off, then player 1 lands on the same cell
        play(&mut m, roll(3, Direction::Forward));
        assert_eq!(m.current, Some(1));
        let events = play(&mut m, roll(2, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::StarAlreadyClaimed { cell: 5 })));
        assert_eq!(m.players[1].stars(), 0);
        // tile points still awarded, same fixed value
        let pts = m.board.tile_points(5);
        assert!(events
            .iter()
            .any(|e| matches!(e, TurnEvent::PointsAwarded { cell: 5, points, .. } if *points == pts)));
    }

    #[test]
    fn positions_stay_on_the_track() {
        let mut m = match_of(2);
        m.board.boss_nodes.clear();
        let mut rng = SmallRng::seed_from_u64(123);
        for _ in 0..400 {
            if m.is_over() || matches!(m.turn, TurnState::Stalled) {
                break;
            }
            let r = rules::roll_die(&mut rng);
            let _ = start_roll(&mut m, r);
            run(&mut m);
            for p in &m.players {
                assert!((1..=BOARD_CELLS).contains(&p.position), "{} off track", p.name);
            }
        }
    }

    #[test]
    fn roll_ignored_while_turn_in_flight() {
        let mut m = match_of(2);
        m.pacing.step_ticks = 5;
        let _ = start_roll(&mut m, roll(3, Direction::Forward));
        tick(&mut m); // resolve spin, start moving
        assert!(matches!(m.turn, TurnState::Moving(_)));

        let events = request_roll(&mut m);
        assert!(events.is_empty());
        assert!(matches!(m.turn, TurnState::Moving(_)));
        let events = start_roll(&mut m, roll(6, Direction::Forward));
        assert!(events.is_empty());
    }

    #[test]
    fn boss_success_keeps_normal_completion() {
        let mut m = match_of(2);
        place(&mut m, 0, 7);
        // 8 is a default boss node
        let events = play(&mut m, roll(1, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::BossTriggered { cell: 8, .. })));
        let answer = match &m.turn {
            TurnState::Boss { challenge, .. } => challenge.answer(),
            other => panic!("expected boss suspension, got {:?}", other),
        };

        let events = resolve_boss(&mut m, BossAnswer::Answered(answer.to_string()));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::BossWon { .. })));
        assert_eq!(m.players[0].position, 8);
        assert_eq!(m.players[0].stars(), 2);
        // normal rotation afterwards
        assert_eq!(m.current, Some(1));
    }

    #[test]
    fn boss_failure_retreats_and_forces_rotation() {
        let mut m = match_of(2);
        // put a boss on a star cell so the landing sets the extra-turn
        // flag, then prove the failure overrides it
        m.board.boss_nodes.clear();
        m.board.boss_nodes.insert(15);
        place(&mut m, 0, 13);
        m.players[0].add_score(100);
        m.players[0].add_stars(3);

        let events = play(&mut m, roll(2, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::StarCollected { cell: 15, .. })));
        assert!(matches!(m.turn, TurnState::Boss { extra_turn: true, .. }));

        let events = resolve_boss(&mut m, BossAnswer::TimedOut);
        assert!(events.iter().any(|e| matches!(e, TurnEvent::BossLost { retreat_to: 14, .. })));
        assert_eq!(m.players[0].position, 14);
        // penalties applied (-5 points, -1 star from 100/4-after-landing)
        assert_eq!(m.players[0].stars(), 3); // 3 + 1 star - 1 penalty
        // the extra turn is overridden: player 1 is up
        assert_eq!(m.current, Some(1));
        assert!(!events.iter().any(|e| matches!(e, TurnEvent::ExtraTurn { .. })));
    }

    #[test]
    fn boss_penalties_floor_at_zero() {
        let mut m = match_of(2);
        place(&mut m, 0, 7);
        let events = play(&mut m, roll(1, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::BossTriggered { .. })));
        // fresh player: whatever tile points they just earned are small;
        // stars are zero and must stay zero
        resolve_boss(&mut m, BossAnswer::Answered("not a number".into()));
        assert_eq!(m.players[0].stars(), 0);
    }

    #[test]
    fn boss_retreat_near_start_clamps_to_cell_one() {
        let mut m = match_of(2);
        m.board.boss_nodes.clear();
        m.board.boss_nodes.insert(1);
        // backward roll with empty history resolves at 1, triggering the boss
        let events = play(&mut m, roll(3, Direction::Backward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::BossTriggered { cell: 1, .. })));
        resolve_boss(&mut m, BossAnswer::Cancelled);
        assert_eq!(m.players[0].position, 1);
    }

    #[test]
    fn finishing_ends_a_two_player_match_early() {
        let mut m = match_of(2);
        m.board.boss_nodes.clear();
        place(&mut m, 0, 62);
        m.players[0].add_score(10);
        m.players[1].add_stars(10); // total 50 beats 10 + landing points

        let events = play(&mut m, roll(2, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::PlayerFinished { player: 0 })));
        // player 1 never reached the finish, yet the match is over
        let winner = match &m.turn {
            TurnState::Ended { winner } => *winner,
            other => panic!("expected match end, got {:?}", other),
        };
        assert_eq!(winner, Some(1));
        assert!(m.players[0].finished);
        assert!(!m.players[1].finished);
    }

    #[test]
    fn overshooting_the_finish_clamps_and_finishes() {
        let mut m = match_of(2);
        m.board.boss_nodes.clear();
        place(&mut m, 0, 62);
        // roll 6: steps 63, 64 — walk ends at the finish with steps left
        let events = play(&mut m, roll(6, Direction::Forward));
        assert_eq!(m.players[0].position, 64);
        assert!(events.iter().any(|e| matches!(e, TurnEvent::PlayerFinished { player: 0 })));
    }

    #[test]
    fn three_player_match_continues_after_first_finisher() {
        let mut m = match_of(3);
        m.board.boss_nodes.clear();
        place(&mut m, 0, 63);

        let events = play(&mut m, roll(1, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::PlayerFinished { player: 0 })));
        assert!(!m.is_over());
        // finisher is out of the rotation for good
        assert_eq!(m.current, Some(1));
        play(&mut m, roll(1, Direction::Forward));
        assert_eq!(m.current, Some(2));
        play(&mut m, roll(1, Direction::Forward));
        assert_eq!(m.current, Some(1));
    }

    #[test]
    fn star_on_final_landing_grants_extra_turn() {
        let mut m = match_of(2);
        m.board.boss_nodes.clear();
        place(&mut m, 0, 8);

        let events = play(&mut m, roll(2, Direction::Forward));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::StarCollected { cell: 10, .. })));
        assert!(events.iter().any(|e| matches!(e, TurnEvent::ExtraTurn { player: 0 })));
        assert_eq!(m.current, Some(0));
        assert!(matches!(m.turn, TurnState::AwaitingRoll));
    }
}
