/// Game configuration: every tunable the simulation reads.
///
/// Loaded from an optional RON file; any field left out keeps its default.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Upper bound on enemy lanes; keeps per-spawn lane bookkeeping small.
pub const MAX_COLUMNS: u32 = 1024;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Target roster size, restored every tick.
    pub max_enemies: usize,
    pub game_width: f32,
    pub game_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the bottom of the field and the player's drawn position.
    pub player_floor_margin: f32,
    /// Starting x, measured in player widths.
    pub player_start_column: u32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Enemy fall speed range, in game units per millisecond.
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub starting_lives: i32,
    pub tick_interval_ms: u64,
    /// Upper bound on a single frame's `dt`. `None` leaves it unclamped.
    pub max_frame_dt_ms: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_enemies: 3,
            game_width: 375.0,
            game_height: 500.0,
            player_width: 75.0,
            player_height: 54.0,
            player_floor_margin: 10.0,
            player_start_column: 2,
            enemy_width: 75.0,
            enemy_height: 156.0,
            enemy_speed_min: 0.25,
            enemy_speed_max: 0.75,
            starting_lives: 3,
            tick_interval_ms: 20,
            max_frame_dt_ms: None,
        }
    }
}

impl GameConfig {
    /// Read and validate a RON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("loading {}", path.display()))
    }

    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: GameConfig = ron::from_str(text).context("parsing game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Number of enemy lanes across the field.
    pub fn columns(&self) -> u32 {
        (self.game_width / self.enemy_width).floor() as u32
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.game_width > 0.0 && self.game_height > 0.0,
            "game dimensions must be positive (got {}x{})",
            self.game_width,
            self.game_height
        );
        ensure!(
            self.player_width > 0.0 && self.player_height > 0.0,
            "player dimensions must be positive"
        );
        ensure!(
            self.enemy_width > 0.0 && self.enemy_height > 0.0,
            "enemy dimensions must be positive"
        );
        ensure!(
            self.player_width <= self.game_width,
            "player is wider than the field"
        );
        ensure!(
            (self.player_start_column as f32 + 1.0) * self.player_width <= self.game_width,
            "player_start_column ({}) puts the player outside the field",
            self.player_start_column
        );
        ensure!(
            self.game_width / self.enemy_width <= MAX_COLUMNS as f32,
            "enemy_width {} gives more than {} spawn columns",
            self.enemy_width,
            MAX_COLUMNS
        );
        ensure!(
            self.max_enemies as u64 <= self.columns() as u64,
            "max_enemies ({}) exceeds the {} available spawn columns",
            self.max_enemies,
            self.columns()
        );
        ensure!(
            self.enemy_speed_min > 0.0 && self.enemy_speed_min <= self.enemy_speed_max,
            "enemy speed range {}..{} is invalid",
            self.enemy_speed_min,
            self.enemy_speed_max
        );
        ensure!(self.starting_lives > 0, "starting_lives must be positive");
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be non-zero");
        Ok(())
    }
}
