/// Game entity types and the geometry they share.

use std::fmt;

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box spanning `[x1, x2] × [y1, y2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionBox {
    pub x1: f32,
    pub x2: f32,
    pub y1: f32,
    pub y2: f32,
}

impl CollisionBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x1: x,
            x2: x + width,
            y1: y,
            y2: y + height,
        }
    }

    /// Open-interval overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &CollisionBox) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }
}

// ── State enums ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Value shown by the lives counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LivesDisplay {
    Lives(i32),
    Dead,
}

impl LivesDisplay {
    pub fn from_lives(lives: i32) -> Self {
        if lives < 0 {
            LivesDisplay::Dead
        } else {
            LivesDisplay::Lives(lives)
        }
    }
}

impl fmt::Display for LivesDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LivesDisplay::Lives(n) => write!(f, "{}", n),
            LivesDisplay::Dead => f.write_str("DEAD"),
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub lives: i32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.player_start_column as f32 * config.player_width,
            y: config.game_height - config.player_height - config.player_floor_margin,
            lives: config.starting_lives,
        }
    }

    pub fn lose_life(&mut self) {
        self.lives -= 1;
    }

    /// Death is only confirmed once lives drops below zero.
    pub fn is_dead(&self) -> bool {
        self.lives < 0
    }

    pub fn move_left(&mut self, config: &GameConfig) {
        if self.x > 0.0 {
            self.x = (self.x - config.player_width).max(0.0);
        }
    }

    pub fn move_right(&mut self, config: &GameConfig) {
        if self.x + config.player_width < config.game_width {
            self.x = (self.x + config.player_width).min(config.game_width - config.player_width);
        }
    }

    /// The vertical span is anchored to the field floor; `self.y` is not used.
    pub fn collision_box(&self, config: &GameConfig) -> CollisionBox {
        let floor_y = config.game_height - config.player_height;
        CollisionBox::new(self.x, floor_y, config.player_width, config.player_height)
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Where and how fast a new enemy enters the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    pub column: u32,
    pub x: f32,
    pub y: f32,
    /// Game units per millisecond.
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub column: u32,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub state: Lifecycle,
}

impl Enemy {
    pub fn spawn(point: SpawnPoint) -> Self {
        Self {
            column: point.column,
            x: point.x,
            y: point.y,
            speed: point.speed,
            state: Lifecycle::Alive,
        }
    }

    /// Fall for `dt_ms` milliseconds; an enemy below the field is destroyed.
    pub fn update(&mut self, dt_ms: u64, game_height: f32) {
        self.y += dt_ms as f32 * self.speed;
        if self.y > game_height {
            self.state = Lifecycle::Destroyed;
        }
    }

    pub fn destroy(&mut self) {
        self.state = Lifecycle::Destroyed;
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == Lifecycle::Destroyed
    }

    pub fn collision_box(&self, config: &GameConfig) -> CollisionBox {
        CollisionBox::new(self.x, self.y, config.enemy_width, config.enemy_height)
    }
}
