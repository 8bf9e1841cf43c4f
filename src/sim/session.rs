/// SessionState: everything that outlives a single match.
///
/// The session owns the phase machine of the application (title screen,
/// lobby, running match, end-of-match summary), the persistent record
/// store, the narration log and the transient prompt buffers. Match
/// state proper lives in `MatchState` and is rebuilt per match.

use std::collections::VecDeque;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::domain::ladder::TARGET_LADDERS;
use crate::domain::rules::STAR_TO_POINT;
use super::match_state::MatchState;
use super::records::RecordStore;

/// Lines kept in the narration log.
const LOG_CAPACITY: usize = 200;

/// Player count bounds for a match.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Lobby,
    Playing,
    Summary,
}

/// One row of the end-of-match summary.
#[derive(Clone, Debug)]
pub struct SummaryRow {
    pub name: String,
    pub score: u32,
    pub stars: u32,
    pub total: i32,
    pub finished: bool,
}

#[derive(Clone, Debug, Default)]
pub struct MatchSummary {
    pub rows: Vec<SummaryRow>,
    pub winner: Option<String>,
}

pub struct SessionState {
    pub phase: Phase,
    pub config: GameConfig,
    pub records: RecordStore,
    pub game: Option<MatchState>,

    /// Rolling narration log, newest at the back.
    pub log: VecDeque<String>,

    // ── Lobby ──
    pub roster: Vec<String>,
    pub name_buf: String,

    // ── Boss prompt ──
    pub answer_buf: String,
    pub boss_deadline: Option<Instant>,

    // ── Summary ──
    pub summary: MatchSummary,

    // ── Transient status line ──
    pub message: String,
    pub message_timer: u32,

    pub anim_tick: u32,
}

impl SessionState {
    pub fn new(config: GameConfig, records: RecordStore) -> Self {
        SessionState {
            phase: Phase::Title,
            config,
            records,
            game: None,
            log: VecDeque::with_capacity(LOG_CAPACITY),
            roster: Vec::new(),
            name_buf: String::new(),
            answer_buf: String::new(),
            boss_deadline: None,
            summary: MatchSummary::default(),
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line.into());
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }

    /// Build a fresh match from the lobby roster and announce it.
    pub fn start_match(&mut self) {
        for name in &self.roster {
            self.records.ensure(name);
        }
        let game = MatchState::new(
            &self.roster,
            &self.config.board,
            self.config.pacing.clone(),
            SmallRng::from_entropy(),
        );

        self.push_log("==== MATCH STARTED ====".to_string());
        for (i, p) in game.players.iter().enumerate() {
            let rec = self
                .records
                .get(&p.name)
                .map(|r| format!("W:{} G:{} S:{} P:{}", r.wins, r.games_played, r.total_stars, r.total_score))
                .unwrap_or_else(|| "W:0 G:0 S:0 P:0".to_string());
            self.push_log(format!("  {}. {} ({})", i + 1, p.name, rec));
        }

        let ladders: Vec<String> = game
            .board
            .ladders
            .iter()
            .map(|l| format!("{}->{}", l.from, l.to))
            .collect();
        if game.board.ladders.len() < TARGET_LADDERS {
            self.push_log(format!(
                "Ladders: only {} of {} placed ({} draws spent)",
                game.board.ladders.len(),
                TARGET_LADDERS,
                game.board.ladder_attempts
            ));
        } else {
            self.push_log(format!("Ladders: {}", ladders.join(" ")));
        }
        self.push_log("Stars sit on multiples of 5, once per match.".to_string());
        self.push_log("Ladders fire only for turns started on a prime cell.".to_string());
        self.push_log(format!("At the end, 1 star = {} points.", STAR_TO_POINT));

        if let Some(first) = game.current_player() {
            self.push_log(format!("First turn: {}", first.name));
        }

        self.game = Some(game);
        self.phase = Phase::Playing;
        self.answer_buf.clear();
        self.boss_deadline = None;
    }

    /// Persist results and move to the summary screen.
    /// Called exactly once, on the MatchEnded event.
    pub fn finish_match(&mut self, winner: Option<usize>) {
        let Some(game) = self.game.take() else {
            return;
        };
        self.records.apply_match(&game.players, winner);

        self.summary = MatchSummary {
            rows: game
                .players
                .iter()
                .map(|p| SummaryRow {
                    name: p.name.clone(),
                    score: p.score(),
                    stars: p.stars(),
                    total: p.match_total(),
                    finished: p.finished,
                })
                .collect(),
            winner: winner.map(|w| game.players[w].name.clone()),
        };
        self.phase = Phase::Summary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "starpath_session_{}_{}.toml",
            tag,
            std::process::id()
        ))
    }

    fn session(tag: &str) -> SessionState {
        let path = temp_path(tag);
        let _ = std::fs::remove_file(&path);
        SessionState::new(GameConfig::default(), RecordStore::load_from(path))
    }

    #[test]
    fn start_match_seeds_records_and_enters_play() {
        let mut s = session("start");
        s.roster = vec!["Ada".into(), "Brin".into()];
        s.start_match();

        assert_eq!(s.phase, Phase::Playing);
        assert!(s.records.get("Ada").is_some());
        assert!(s.records.get("Brin").is_some());
        let game = s.game.as_ref().unwrap();
        assert_eq!(game.players.len(), 2);
        assert!(s.log.iter().any(|l| l.contains("MATCH STARTED")));

        let _ = std::fs::remove_file(temp_path("start"));
    }

    #[test]
    fn finish_match_builds_summary_and_persists() {
        let mut s = session("finish");
        s.roster = vec!["Ada".into(), "Brin".into()];
        s.start_match();
        if let Some(game) = s.game.as_mut() {
            game.players[0].add_score(20);
            game.players[1].add_stars(1);
        }

        s.finish_match(Some(0));

        assert_eq!(s.phase, Phase::Summary);
        assert!(s.game.is_none());
        assert_eq!(s.summary.winner.as_deref(), Some("Ada"));
        assert_eq!(s.summary.rows.len(), 2);
        assert_eq!(s.summary.rows[0].total, 20);
        assert_eq!(s.summary.rows[1].total, STAR_TO_POINT);
        assert_eq!(s.records.get("Ada").unwrap().wins, 1);
        assert_eq!(s.records.get("Brin").unwrap().games_played, 1);

        let _ = std::fs::remove_file(temp_path("finish"));
    }

    #[test]
    fn log_is_bounded() {
        let mut s = session("log");
        for i in 0..(LOG_CAPACITY + 50) {
            s.push_log(format!("line {}", i));
        }
        assert_eq!(s.log.len(), LOG_CAPACITY);
        assert_eq!(s.log.front().unwrap(), "line 50");

        let _ = std::fs::remove_file(temp_path("log"));
    }
}
