/// Spawn placement for new enemies.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{GameConfig, MAX_COLUMNS};
use crate::entities::{Enemy, SpawnPoint};

pub trait SpawnPolicy {
    /// Pick a spot for one new enemy that does not overlap `roster`.
    /// Returns `None` when there is no room.
    fn next_spot(&mut self, roster: &[Enemy], config: &GameConfig) -> Option<SpawnPoint>;
}

/// Splits the field into enemy-wide lanes and drops each new enemy into a
/// random free lane, just above the top edge.
///
/// All randomness comes through the injected RNG so tests can seed it.
pub struct ColumnSpawner<R: Rng> {
    rng: R,
}

impl<R: Rng> ColumnSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SpawnPolicy for ColumnSpawner<R> {
    fn next_spot(&mut self, roster: &[Enemy], config: &GameConfig) -> Option<SpawnPoint> {
        let columns = config.columns().min(MAX_COLUMNS);
        let taken: Vec<u32> = roster.iter().map(|enemy| enemy.column).collect();

        let free: Vec<u32> = (0..columns).filter(|c| !taken.contains(c)).collect();
        let column = *free.choose(&mut self.rng)?;

        let speed = if config.enemy_speed_min < config.enemy_speed_max {
            self.rng
                .gen_range(config.enemy_speed_min..config.enemy_speed_max)
        } else {
            config.enemy_speed_min
        };

        Some(SpawnPoint {
            column,
            x: column as f32 * config.enemy_width,
            y: -config.enemy_height,
            speed,
        })
    }
}
