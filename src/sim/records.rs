/// Persistent cross-match records, keyed by player display name.
///
/// One TOML file (`records.toml`) holding wins / games played / total
/// stars / total score per name. Read at startup, consulted when a
/// player joins (to guarantee an entry exists), written once at match
/// end. I/O failures are never fatal: a missing or unreadable file
/// degrades to an empty store, a failed write is reported and ignored.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerState;

const RECORDS_FILE: &str = "records.toml";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub total_stars: u32,
    #[serde(default)]
    pub total_score: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordsFile {
    #[serde(default)]
    players: BTreeMap<String, PlayerRecord>,
}

pub struct RecordStore {
    path: PathBuf,
    records: BTreeMap<String, PlayerRecord>,
}

impl RecordStore {
    pub fn load() -> Self {
        Self::load_from(records_dir().join(RECORDS_FILE))
    }

    pub fn load_from(path: PathBuf) -> Self {
        let records = match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<RecordsFile>(&text) {
                Ok(file) => file.players,
                Err(e) => {
                    eprintln!("Warning: {} parse error: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        RecordStore { path, records }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.get(name)
    }

    /// Guarantee an entry exists for a joining player.
    pub fn ensure(&mut self, name: &str) {
        if !self.records.contains_key(name) {
            self.records.insert(name.to_string(), PlayerRecord::default());
            self.save();
        }
    }

    /// One games-played/stars/score increment per participant, one win
    /// increment for the winner. Called exactly once per match.
    pub fn apply_match(&mut self, players: &[PlayerState], winner: Option<usize>) {
        for p in players {
            let rec = self.records.entry(p.name.clone()).or_default();
            rec.games_played += 1;
            rec.total_stars += p.stars();
            rec.total_score += p.score();
        }
        if let Some(w) = winner {
            if let Some(p) = players.get(w) {
                let rec = self.records.entry(p.name.clone()).or_default();
                rec.wins += 1;
            }
        }
        self.save();
    }

    /// All records, best first: wins, then total stars, then name.
    pub fn leaderboard(&self) -> Vec<(&str, &PlayerRecord)> {
        let mut rows: Vec<(&str, &PlayerRecord)> =
            self.records.iter().map(|(n, r)| (n.as_str(), r)).collect();
        rows.sort_by(|a, b| {
            b.1.wins
                .cmp(&a.1.wins)
                .then(b.1.total_stars.cmp(&a.1.total_stars))
                .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
        });
        rows
    }

    pub fn save(&self) {
        let file = RecordsFile { players: self.records.clone() };
        let text = match toml::to_string_pretty(&file) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Warning: could not serialize records: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, text) {
            eprintln!("Warning: could not write {}: {e}", self.path.display());
        }
    }

    #[cfg(test)]
    fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Directory for the records file: exe dir when writable (portable
/// installs), else XDG data home, else CWD.
fn records_dir() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            let probe = parent.join(".write_test_starpath");
            if std::fs::write(&probe, "").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return parent.to_path_buf();
            }
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/starpath");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, score: i32, stars: i32) -> PlayerState {
        let mut p = PlayerState::new(name, 0);
        p.add_score(score);
        p.add_stars(stars);
        p
    }

    fn temp_store(tag: &str) -> RecordStore {
        let path = std::env::temp_dir().join(format!(
            "starpath_records_{}_{}.toml",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        RecordStore::load_from(path)
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let store = temp_store("missing");
        assert!(store.leaderboard().is_empty());
    }

    #[test]
    fn apply_match_accumulates_and_crowns_the_winner() {
        let mut store = temp_store("apply");
        let players = vec![player("Ada", 30, 2), player("Brin", 12, 0)];

        store.apply_match(&players, Some(0));
        store.apply_match(&players, Some(1));

        let ada = store.get("Ada").unwrap();
        assert_eq!(ada.wins, 1);
        assert_eq!(ada.games_played, 2);
        assert_eq!(ada.total_stars, 4);
        assert_eq!(ada.total_score, 60);
        let brin = store.get("Brin").unwrap();
        assert_eq!(brin.wins, 1);
        assert_eq!(brin.games_played, 2);

        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn records_round_trip_through_toml() {
        let mut store = temp_store("roundtrip");
        store.ensure("Ada");
        store.apply_match(&[player("Ada", 9, 1)], Some(0));
        let path = store.path().to_path_buf();

        let reloaded = RecordStore::load_from(path.clone());
        let ada = reloaded.get("Ada").unwrap();
        assert_eq!(ada.wins, 1);
        assert_eq!(ada.total_score, 9);
        assert_eq!(ada.total_stars, 1);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let path = std::env::temp_dir().join(format!(
            "starpath_records_corrupt_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "this is [not toml").unwrap();
        let store = RecordStore::load_from(path.clone());
        assert!(store.leaderboard().is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn leaderboard_orders_by_wins_stars_then_name() {
        let mut store = temp_store("order");
        store.records.insert(
            "carol".into(),
            PlayerRecord { wins: 2, total_stars: 1, ..Default::default() },
        );
        store.records.insert(
            "alice".into(),
            PlayerRecord { wins: 2, total_stars: 5, ..Default::default() },
        );
        store.records.insert(
            "Bob".into(),
            PlayerRecord { wins: 2, total_stars: 1, ..Default::default() },
        );
        store.records.insert(
            "dave".into(),
            PlayerRecord { wins: 3, total_stars: 0, ..Default::default() },
        );

        let names: Vec<&str> = store.leaderboard().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["dave", "alice", "Bob", "carol"]);
    }
}
