//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory, then the CWD.
//! Missing files or keys fall back to the built-in defaults; problems are
//! collected as warnings and logged once logging is up.

use serde::Deserialize;
use std::path::PathBuf;

use crate::grid::Grid;
use crate::input::{Button, KeyMap};

// ── Limits ──

/// Largest grid side accepted from the config file.
pub const MAX_GRID_SIDE: i32 = 64;
/// Widest score panel, in characters.
pub const MAX_SCORE_WIDTH: usize = 32;
/// Largest terminal cell, in characters per axis.
pub const MAX_CELL_SIDE: u16 = 8;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub transition_step: f64,
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub keys: KeyMap,
    pub log: LogConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub classic: (usize, usize),
    pub wide: (usize, usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    pub score_width: usize,
    pub cell_width: u16,
    pub cell_height: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    pub tick_rate_ms: u64,
    pub snake_move_every: u32,
    /// Idle ticks before the current game starts playing itself. 0 disables.
    pub demo_after_ticks: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub level: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    transition: TomlTransition,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    keys: TomlKeys,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_classic_width")]
    classic_width: i32,
    #[serde(default = "default_classic_height")]
    classic_height: i32,
    #[serde(default = "default_wide_width")]
    wide_width: i32,
    #[serde(default = "default_wide_height")]
    wide_height: i32,
}

#[derive(Deserialize, Debug)]
struct TomlTransition {
    #[serde(default = "default_transition_step")]
    step: f64,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_score_width")]
    score_width: usize,
    #[serde(default = "default_cell_width")]
    cell_width: u16,
    #[serde(default = "default_cell_height")]
    cell_height: u16,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_snake_move")]
    snake_move_every: u32,
    #[serde(default = "default_demo_after")]
    demo_after_ticks: u32,
}

#[derive(Deserialize, Debug)]
struct TomlKeys {
    #[serde(default = "default_up")]
    up: Vec<String>,
    #[serde(default = "default_down")]
    down: Vec<String>,
    #[serde(default = "default_left")]
    left: Vec<String>,
    #[serde(default = "default_right")]
    right: Vec<String>,
    #[serde(default = "default_a")]
    a: Vec<String>,
    #[serde(default = "default_b")]
    b: Vec<String>,
    #[serde(default = "default_x")]
    x: Vec<String>,
    #[serde(default = "default_y")]
    y: Vec<String>,
    #[serde(default = "default_l")]
    l: Vec<String>,
    #[serde(default = "default_r")]
    r: Vec<String>,
    #[serde(default = "default_plus")]
    plus: Vec<String>,
    #[serde(default = "default_minus")]
    minus: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_dir")]
    dir: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_classic_width() -> i32 { 10 }
fn default_classic_height() -> i32 { 20 }
fn default_wide_width() -> i32 { 20 }
fn default_wide_height() -> i32 { 20 }
fn default_transition_step() -> f64 { 1.5 }
fn default_score_width() -> usize { 8 }
fn default_cell_width() -> u16 { 2 }
fn default_cell_height() -> u16 { 1 }
fn default_tick_rate() -> u64 { 16 } // ~60 FPS
fn default_snake_move() -> u32 { 8 }
fn default_demo_after() -> u32 { 1800 }

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_up() -> Vec<String> { keys(&["Up", "w"]) }
fn default_down() -> Vec<String> { keys(&["Down", "s"]) }
fn default_left() -> Vec<String> { keys(&["Left", "a"]) }
fn default_right() -> Vec<String> { keys(&["Right", "d"]) }
fn default_a() -> Vec<String> { keys(&["z"]) }
fn default_b() -> Vec<String> { keys(&["x"]) }
fn default_x() -> Vec<String> { keys(&["c"]) }
fn default_y() -> Vec<String> { keys(&["v"]) }
fn default_l() -> Vec<String> { keys(&["h"]) }
fn default_r() -> Vec<String> { keys(&["Enter", "Space"]) }
fn default_plus() -> Vec<String> { keys(&["q", "Esc"]) }
fn default_minus() -> Vec<String> { keys(&["r"]) }
fn default_log_dir() -> String { "logs".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid {
            classic_width: default_classic_width(),
            classic_height: default_classic_height(),
            wide_width: default_wide_width(),
            wide_height: default_wide_height(),
        }
    }
}

impl Default for TomlTransition {
    fn default() -> Self {
        TomlTransition { step: default_transition_step() }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            score_width: default_score_width(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_rate_ms: default_tick_rate(),
            snake_move_every: default_snake_move(),
            demo_after_ticks: default_demo_after(),
        }
    }
}

impl Default for TomlKeys {
    fn default() -> Self {
        TomlKeys {
            up: default_up(),
            down: default_down(),
            left: default_left(),
            right: default_right(),
            a: default_a(),
            b: default_b(),
            x: default_x(),
            y: default_y(),
            l: default_l(),
            r: default_r(),
            plus: default_plus(),
            minus: default_minus(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

// ── Loading ──

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), &mut vec![])
    }
}

impl GameConfig {
    /// Load config from `config.toml`.
    /// Returns the config plus any warnings raised while reading it.
    pub fn load() -> (Self, Vec<String>) {
        let mut warnings = vec![];
        let Some((path, text)) = read_config(&candidate_dirs(), &mut warnings) else {
            let config = Self::from_toml(TomlConfig::default(), &mut warnings);
            return (config, warnings);
        };
        match Self::parse(&text) {
            Ok((config, more)) => {
                warnings.extend(more);
                (config, warnings)
            }
            Err(e) => {
                warnings.push(format!("{} parse error, using defaults: {e}", path.display()));
                let config = Self::from_toml(TomlConfig::default(), &mut warnings);
                (config, warnings)
            }
        }
    }

    /// Parse config text. Invalid values are clamped and reported.
    pub fn parse(text: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        let mut warnings = vec![];
        let config = Self::from_toml(toml_cfg, &mut warnings);
        Ok((config, warnings))
    }

    fn from_toml(cfg: TomlConfig, warnings: &mut Vec<String>) -> Self {
        let mut step = cfg.transition.step;
        if !(step.is_finite() && step > 0.0) {
            warnings.push(format!(
                "transition.step must be positive (got {step}), using {}",
                default_transition_step()
            ));
            step = default_transition_step();
        }

        let mut timing = TimingConfig {
            tick_rate_ms: cfg.timing.tick_rate_ms,
            snake_move_every: cfg.timing.snake_move_every,
            demo_after_ticks: cfg.timing.demo_after_ticks,
        };
        if timing.snake_move_every == 0 {
            warnings.push("timing.snake_move_every must be at least 1".to_string());
            timing.snake_move_every = 1;
        }
        if timing.tick_rate_ms == 0 {
            warnings.push("timing.tick_rate_ms must be at least 1".to_string());
            timing.tick_rate_ms = 1;
        }

        let k = &cfg.keys;
        let bindings: [(Button, &[String]); 12] = [
            (Button::Up, k.up.as_slice()),
            (Button::Down, k.down.as_slice()),
            (Button::Left, k.left.as_slice()),
            (Button::Right, k.right.as_slice()),
            (Button::A, k.a.as_slice()),
            (Button::B, k.b.as_slice()),
            (Button::X, k.x.as_slice()),
            (Button::Y, k.y.as_slice()),
            (Button::L, k.l.as_slice()),
            (Button::R, k.r.as_slice()),
            (Button::Plus, k.plus.as_slice()),
            (Button::Minus, k.minus.as_slice()),
        ];
        let (keys, unknown) = KeyMap::from_bindings(bindings);
        for name in unknown {
            warnings.push(format!("unknown key name in [keys]: {name:?}"));
        }

        let grid = GridConfig {
            classic: grid_size(
                "classic",
                (cfg.grid.classic_width, cfg.grid.classic_height),
                (default_classic_width(), default_classic_height()),
                warnings,
            ),
            wide: grid_size(
                "wide",
                (cfg.grid.wide_width, cfg.grid.wide_height),
                (default_wide_width(), default_wide_height()),
                warnings,
            ),
        };

        let mut score_width = cfg.display.score_width;
        if score_width > MAX_SCORE_WIDTH {
            warnings.push(format!(
                "display.score_width {score_width} is too wide, using {MAX_SCORE_WIDTH}"
            ));
            score_width = MAX_SCORE_WIDTH;
        }
        let cell_width = cell_side("cell_width", cfg.display.cell_width, warnings);
        let cell_height = cell_side("cell_height", cfg.display.cell_height, warnings);

        GameConfig {
            grid,
            transition_step: step,
            display: DisplayConfig {
                score_width,
                cell_width,
                cell_height,
            },
            timing,
            keys,
            log: LogConfig {
                dir: PathBuf::from(cfg.log.dir),
                level: cfg.log.level,
            },
        }
    }
}

/// Validate one `[grid]` size. Negative sizes fall back to the default;
/// oversized ones are cut down to `MAX_GRID_SIDE`.
fn grid_size(
    name: &str,
    (width, height): (i32, i32),
    fallback: (i32, i32),
    warnings: &mut Vec<String>,
) -> (usize, usize) {
    let clamped = (width.min(MAX_GRID_SIDE), height.min(MAX_GRID_SIDE));
    if clamped != (width, height) {
        warnings.push(format!(
            "grid.{name} size {width}x{height} is too large, limit is {MAX_GRID_SIDE}"
        ));
    }
    match Grid::try_new(clamped.0, clamped.1) {
        Ok(grid) => (grid.width(), grid.height()),
        Err(e) => {
            warnings.push(format!("grid.{name}: {e}, using {}x{}", fallback.0, fallback.1));
            (fallback.0 as usize, fallback.1 as usize)
        }
    }
}

fn cell_side(name: &str, value: u16, warnings: &mut Vec<String>) -> u16 {
    let clamped = value.clamp(1, MAX_CELL_SIDE);
    if clamped != value {
        warnings.push(format!("display.{name} must be 1..={MAX_CELL_SIDE} (got {value})"));
    }
    clamped
}

/// Candidate directories to search: exe dir, then CWD.
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

/// The first readable `config.toml` in `search_dirs`.
fn read_config(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> Option<(PathBuf, String)> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => return Some((path, text)),
            Err(e) => {
                warnings.push(format!("could not read {}: {e}", path.display()));
            }
        }
    }
    None
}
