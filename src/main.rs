/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::boss::{BossAnswer, ANSWER_WINDOW};
use domain::rules::Direction;
use sim::event::TurnEvent;
use sim::match_state::TurnState;
use sim::records::RecordStore;
use sim::session::{Phase, SessionState, MAX_PLAYERS, MIN_PLAYERS};
use sim::turn;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

/// Longest accepted player name.
const NAME_LIMIT: usize = 16;

fn main() {
    let config = GameConfig::load();
    let records = RecordStore::load();
    let mut session = SessionState::new(config, records);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut session, &mut renderer, sound.as_ref());

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Starpath!");
}

fn game_loop(
    session: &mut SessionState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let tick_rate = Duration::from_millis(session.config.pacing.tick_rate_ms);
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_input(session, &kb, sound) {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            session.anim_tick = session.anim_tick.wrapping_add(1);
            session.tick_message();

            if session.phase == Phase::Playing {
                tick_match(session, sound);
            }

            last_tick = Instant::now();
        }

        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Simulation tick ──

fn tick_match(session: &mut SessionState, sound: Option<&SoundEngine>) {
    let Some(game) = session.game.as_mut() else {
        return;
    };

    let mut events = Vec::new();

    // The boss prompt is the only suspension point; its deadline lives
    // out here, never inside the simulation.
    if matches!(game.turn, TurnState::Boss { .. }) {
        if let Some(deadline) = session.boss_deadline {
            if Instant::now() >= deadline {
                events.extend(turn::resolve_boss(game, BossAnswer::TimedOut));
                session.boss_deadline = None;
            }
        }
    }

    events.extend(turn::tick(game));
    process_events(session, &events, sound);
}

fn process_events(session: &mut SessionState, events: &[TurnEvent], sound: Option<&SoundEngine>) {
    for event in events {
        if let Some(sfx) = sound {
            match event {
                TurnEvent::Stepped { .. } => sfx.play_step(),
                TurnEvent::StarCollected { .. } => sfx.play_star(),
                TurnEvent::LadderUsed { .. } => sfx.play_ladder(),
                TurnEvent::BossWon { .. } => sfx.play_boss_won(),
                TurnEvent::BossLost { .. } => sfx.play_boss_lost(),
                TurnEvent::PlayerFinished { .. } | TurnEvent::MatchEnded { .. } => sfx.play_finish(),
                _ => {}
            }
        }

        if let Some(line) = narrate(session, event) {
            session.push_log(line);
        }

        match event {
            TurnEvent::BossTriggered { .. } => {
                session.answer_buf.clear();
                session.boss_deadline = Some(Instant::now() + ANSWER_WINDOW);
            }
            TurnEvent::MatchEnded { winner } => {
                session.finish_match(*winner);
            }
            _ => {}
        }
    }
}

/// Turn a simulation event into a narration line.
fn narrate(session: &SessionState, event: &TurnEvent) -> Option<String> {
    let game = session.game.as_ref()?;
    let name = |i: &usize| game.players.get(*i).map(|p| p.name.as_str()).unwrap_or("?");

    let line = match event {
        TurnEvent::DiceRolled { player, face, direction, on_prime } => format!(
            "{} rolls {} {}{}",
            name(player),
            face,
            match direction {
                Direction::Forward => "forward",
                Direction::Backward => "backward",
            },
            if *on_prime { " (prime start: ladders armed)" } else { "" }
        ),
        TurnEvent::Stepped { to, remaining, .. } => {
            format!("  step to {} ({} left)", to, remaining)
        }
        TurnEvent::LadderUsed { from, to, .. } => format!("  prime ladder! {} -> {}", from, to),
        TurnEvent::StarCollected { cell, .. } => format!("  star collected at {}!", cell),
        TurnEvent::StarAlreadyClaimed { cell } => format!("  star at {} already claimed", cell),
        TurnEvent::PointsAwarded { cell, points, .. } => {
            format!("  +{} pts for landing on {}", points, cell)
        }
        TurnEvent::Landed { cell, .. } => format!("  landed on {}", cell),
        TurnEvent::BossTriggered { cell, .. } => format!("  a boss guards cell {}!", cell),
        TurnEvent::BossWon { points, stars, .. } => {
            format!("  boss defeated: +{} pts, +{} stars", points, stars)
        }
        TurnEvent::BossLost { points, stars, retreat_to, .. } => format!(
            "  boss wins: {} pts, {} stars, back to {}",
            points, stars, retreat_to
        ),
        TurnEvent::PlayerFinished { player } => format!("{} reached the finish!", name(player)),
        TurnEvent::ExtraTurn { player } => format!("  extra turn for {}", name(player)),
        TurnEvent::NextTurn { player } => format!("next: {}", name(player)),
        TurnEvent::QueueStalled => "no active players left, match is waiting".to_string(),
        TurnEvent::MatchEnded { winner } => match winner {
            Some(w) => format!("match over, winner: {}", name(w)),
            None => "match over, no winner".to_string(),
        },
    };
    Some(line)
}

// ── Input handling per phase ──

/// Returns true to quit the application.
fn handle_input(session: &mut SessionState, kb: &InputState, sound: Option<&SoundEngine>) -> bool {
    let confirm = kb.any_pressed(&[KeyCode::Enter]);
    let esc = kb.any_pressed(&[KeyCode::Esc]);

    match session.phase {
        // ── Title ──
        Phase::Title => {
            if confirm {
                // config edits apply from the next match start
                session.config = GameConfig::load();
                session.roster.clear();
                session.name_buf.clear();
                session.phase = Phase::Lobby;
            } else if esc || kb.any_pressed(&[KeyCode::Char('q'), KeyCode::Char('Q')]) {
                return true;
            }
        }

        // ── Lobby ──
        Phase::Lobby => {
            if esc {
                session.phase = Phase::Title;
                return false;
            }
            edit_buffer(session, kb, NAME_LIMIT);
            if confirm {
                let name = session.name_buf.trim().to_string();
                if name.is_empty() {
                    if session.roster.len() >= MIN_PLAYERS {
                        session.start_match();
                    } else {
                        session.set_message(
                            &format!("Need at least {} players.", MIN_PLAYERS),
                            40,
                        );
                    }
                } else if session.roster.len() >= MAX_PLAYERS {
                    session.set_message(&format!("Roster is full ({}).", MAX_PLAYERS), 40);
                } else if session.roster.iter().any(|n| n == &name) {
                    session.set_message("That name is already taken.", 40);
                } else {
                    session.roster.push(name);
                    session.name_buf.clear();
                }
            }
        }

        // ── Playing ──
        Phase::Playing => {
            let boss_active = session
                .game
                .as_ref()
                .map(|g| matches!(g.turn, TurnState::Boss { .. }))
                .unwrap_or(false);

            if boss_active {
                edit_answer(session, kb);
                let outcome = if confirm {
                    Some(BossAnswer::Answered(session.answer_buf.clone()))
                } else if esc {
                    Some(BossAnswer::Cancelled)
                } else {
                    None
                };
                if let Some(outcome) = outcome {
                    session.boss_deadline = None;
                    let events = session
                        .game
                        .as_mut()
                        .map(|g| turn::resolve_boss(g, outcome))
                        .unwrap_or_default();
                    process_events(session, &events, sound);
                }
                return false;
            }

            if kb.any_pressed(&[KeyCode::Char('r'), KeyCode::Char('R'), KeyCode::Char(' ')]) {
                if let Some(game) = session.game.as_mut() {
                    let events = turn::request_roll(game);
                    let accepted = matches!(game.turn, TurnState::Rolling { .. });
                    process_events(session, &events, sound);
                    if accepted {
                        if let Some(sfx) = sound {
                            sfx.play_roll();
                        }
                    }
                }
            } else if esc || kb.any_pressed(&[KeyCode::Char('q'), KeyCode::Char('Q')]) {
                // abandon the match; nothing is persisted
                session.game = None;
                session.boss_deadline = None;
                session.phase = Phase::Title;
                session.set_message("Match abandoned.", 40);
            }
        }

        // ── Summary ──
        Phase::Summary => {
            if confirm || esc {
                session.phase = Phase::Title;
            }
        }
    }

    false
}

/// Line editing for the lobby name field.
fn edit_buffer(session: &mut SessionState, kb: &InputState, limit: usize) {
    for &c in kb.typed_chars() {
        if session.name_buf.chars().count() < limit && (c.is_alphanumeric() || c == ' ' || c == '-') {
            session.name_buf.push(c);
        }
    }
    if kb.was_pressed(KeyCode::Backspace) {
        session.name_buf.pop();
    }
}

/// Line editing for the boss answer field: integers only.
fn edit_answer(session: &mut SessionState, kb: &InputState) {
    for &c in kb.typed_chars() {
        let minus_ok = c == '-' && session.answer_buf.is_empty();
        if (c.is_ascii_digit() || minus_ok) && session.answer_buf.len() < 8 {
            session.answer_buf.push(c);
        }
    }
    if kb.was_pressed(KeyCode::Backspace) {
        session.answer_buf.pop();
    }
}
