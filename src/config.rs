/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Board values are validated here; the simulation assumes clean input.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::board::{BoardSettings, BOARD_CELLS};

// ── Public Config Struct ──

#[derive(Clone, Debug, Default)]
pub struct GameConfig {
    pub board: BoardSettings,
    pub pacing: PacingConfig,
}

/// Cosmetic tick intervals. One tick = `tick_rate_ms` of wall clock;
/// the other fields count ticks.
#[derive(Clone, Debug)]
pub struct PacingConfig {
    pub tick_rate_ms: u64,
    /// Dice flicker duration before the face settles.
    pub roll_spin_ticks: u32,
    /// Delay between movement steps.
    pub step_ticks: u32,
    /// Pause at a ladder arrival before stepping resumes.
    pub teleport_hold_ticks: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig {
            tick_rate_ms: default_tick_rate(),
            roll_spin_ticks: default_roll_spin(),
            step_ticks: default_step_ticks(),
            teleport_hold_ticks: default_teleport_hold(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    board: TomlBoard,
    #[serde(default)]
    pacing: TomlPacing,
}

#[derive(Deserialize, Debug)]
struct TomlBoard {
    #[serde(default = "default_boss_nodes")]
    boss_nodes: Vec<i64>,
    #[serde(default = "default_boss_win_points")]
    boss_win_points: i32,
    #[serde(default = "default_boss_win_stars")]
    boss_win_stars: i32,
    #[serde(default = "default_boss_lose_points")]
    boss_lose_points: i32,
    #[serde(default = "default_boss_lose_stars")]
    boss_lose_stars: i32,
}

#[derive(Deserialize, Debug)]
struct TomlPacing {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_roll_spin")]
    roll_spin_ticks: u32,
    #[serde(default = "default_step_ticks")]
    step_ticks: u32,
    #[serde(default = "default_teleport_hold")]
    teleport_hold_ticks: u32,
}

// ── Defaults ──

fn default_boss_nodes() -> Vec<i64> { vec![8, 15, 23, 31, 42, 55] }
fn default_boss_win_points() -> i32 { 10 }
fn default_boss_win_stars() -> i32 { 2 }
fn default_boss_lose_points() -> i32 { -5 }
fn default_boss_lose_stars() -> i32 { -1 }

fn default_tick_rate() -> u64 { 70 }
fn default_roll_spin() -> u32 { 12 }     // ~0.85s of dice flicker
fn default_step_ticks() -> u32 { 6 }     // ~0.4s per movement step
fn default_teleport_hold() -> u32 { 10 } // ~0.7s pause at a ladder arrival

impl Default for TomlBoard {
    fn default() -> Self {
        TomlBoard {
            boss_nodes: default_boss_nodes(),
            boss_win_points: default_boss_win_points(),
            boss_win_stars: default_boss_win_stars(),
            boss_lose_points: default_boss_lose_points(),
            boss_lose_stars: default_boss_lose_stars(),
        }
    }
}

impl Default for TomlPacing {
    fn default() -> Self {
        TomlPacing {
            tick_rate_ms: default_tick_rate(),
            roll_spin_ticks: default_roll_spin(),
            step_ticks: default_step_ticks(),
            teleport_hold_ticks: default_teleport_hold(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        build(load_toml(&candidate_dirs()))
    }
}

/// Validate the raw TOML values into a GameConfig.
/// Boss nodes outside the track are dropped with a warning.
fn build(toml_cfg: TomlConfig) -> GameConfig {
    let mut boss_nodes = Vec::new();
    for node in &toml_cfg.board.boss_nodes {
        if (1..=BOARD_CELLS as i64).contains(node) {
            boss_nodes.push(*node as u8);
        } else {
            eprintln!("Warning: boss node {} outside 1..={}, ignored", node, BOARD_CELLS);
        }
    }

    GameConfig {
        board: BoardSettings {
            boss_nodes,
            boss_win_points: toml_cfg.board.boss_win_points,
            boss_win_stars: toml_cfg.board.boss_win_stars,
            boss_lose_points: toml_cfg.board.boss_lose_points,
            boss_lose_stars: toml_cfg.board.boss_lose_stars,
        },
        pacing: PacingConfig {
            tick_rate_ms: toml_cfg.pacing.tick_rate_ms,
            roll_spin_ticks: toml_cfg.pacing.roll_spin_ticks,
            step_ticks: toml_cfg.pacing.step_ticks,
            teleport_hold_ticks: toml_cfg.pacing.teleport_hold_ticks,
        },
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = build(toml::from_str::<TomlConfig>("").unwrap());
        assert_eq!(cfg.board.boss_nodes, vec![8, 15, 23, 31, 42, 55]);
        assert_eq!(cfg.board.boss_win_points, 10);
        assert_eq!(cfg.board.boss_lose_stars, -1);
        assert_eq!(cfg.pacing.tick_rate_ms, 70);
    }

    #[test]
    fn partial_sections_keep_per_key_defaults() {
        let text = r#"
            [board]
            boss_win_points = 25

            [pacing]
            step_ticks = 2
        "#;
        let cfg = build(toml::from_str::<TomlConfig>(text).unwrap());
        assert_eq!(cfg.board.boss_win_points, 25);
        assert_eq!(cfg.board.boss_win_stars, 2);
        assert_eq!(cfg.pacing.step_ticks, 2);
        assert_eq!(cfg.pacing.roll_spin_ticks, 12);
    }

    #[test]
    fn out_of_range_boss_nodes_are_dropped() {
        let text = r#"
            [board]
            boss_nodes = [0, 8, 65, 42, -3]
        "#;
        let cfg = build(toml::from_str::<TomlConfig>(text).unwrap());
        assert_eq!(cfg.board.boss_nodes, vec![8, 42]);
    }
}
