/// The game loop: one discrete simulation step per `tick`.
///
/// `GameLoop` owns the player and the enemy roster.  Time, spawn placement
/// and presentation are injected so the loop itself stays deterministic
/// under test.  The caller drives it: call `tick`, wait for the delay it
/// returns, call `tick` again, until it reports `GameOver`.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::entities::{Enemy, GameStatus, LivesDisplay, Player};
use crate::spawn::SpawnPolicy;

/// Receives what the loop wants shown to the user.
pub trait Presenter {
    fn update_lives(&mut self, lives: LivesDisplay);

    /// Called exactly once, on the tick that confirms the player's death.
    fn game_over(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule the next tick after this delay.
    Continue(Duration),
    /// The loop has stopped for good.
    GameOver,
}

pub struct GameLoop<C: Clock, S: SpawnPolicy> {
    config: GameConfig,
    clock: C,
    spawner: S,
    player: Player,
    enemies: Vec<Enemy>,
    last_frame: u64,
    status: GameStatus,
}

impl<C: Clock, S: SpawnPolicy> GameLoop<C, S> {
    pub fn new(config: GameConfig, clock: C, spawner: S) -> Result<Self> {
        config.validate()?;
        let player = Player::new(&config);
        let last_frame = clock.now_ms();
        Ok(Self {
            config,
            clock,
            spawner,
            player,
            enemies: Vec::new(),
            last_frame,
            status: GameStatus::Playing,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn move_player_left(&mut self) {
        self.player.move_left(&self.config);
    }

    pub fn move_player_right(&mut self) {
        self.player.move_right(&self.config);
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Run one simulation step.
    pub fn tick(&mut self, presenter: &mut impl Presenter) -> TickOutcome {
        if self.status == GameStatus::GameOver {
            return TickOutcome::GameOver;
        }

        let dt = self.frame_dt();

        let game_height = self.config.game_height;
        for enemy in &mut self.enemies {
            enemy.update(dt, game_height);
        }

        self.prune_destroyed();
        self.replenish();

        let dead = self.check_player_hit(presenter);

        // A collision destroys an enemy after replenishment; compact and
        // refill again so the roster is full and clean between ticks.
        if self.enemies.iter().any(Enemy::is_destroyed) {
            self.prune_destroyed();
            self.replenish();
        }

        if dead {
            self.status = GameStatus::GameOver;
            info!(lives = self.player.lives, "player dead, stopping game loop");
            presenter.game_over();
            return TickOutcome::GameOver;
        }

        TickOutcome::Continue(self.config.tick_interval())
    }

    /// Milliseconds since the previous tick (or since construction, on the
    /// first one).
    fn frame_dt(&mut self) -> u64 {
        let now = self.clock.now_ms();
        let dt = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        match self.config.max_frame_dt_ms {
            Some(cap) => dt.min(cap),
            None => dt,
        }
    }

    fn prune_destroyed(&mut self) {
        self.enemies.retain(|enemy| !enemy.is_destroyed());
    }

    /// Top the roster back up to `max_enemies`, consulting the roster as it
    /// stands after pruning.
    fn replenish(&mut self) {
        while self.enemies.len() < self.config.max_enemies {
            match self.spawner.next_spot(&self.enemies, &self.config) {
                Some(point) => {
                    debug!(column = point.column, speed = point.speed, "spawning enemy");
                    self.enemies.push(Enemy::spawn(point));
                }
                None => {
                    warn!(
                        roster = self.enemies.len(),
                        target = self.config.max_enemies,
                        "spawn policy found no free spot"
                    );
                    break;
                }
            }
        }
    }

    /// Destroy the first enemy overlapping the player, if any, and take one
    /// life for it.  At most one hit is counted per call.
    ///
    /// Returns whether the player is now dead.
    pub fn check_player_hit(&mut self, presenter: &mut impl Presenter) -> bool {
        let config = &self.config;
        let player_box = self.player.collision_box(config);

        let hit = self
            .enemies
            .iter_mut()
            .filter(|enemy| !enemy.is_destroyed())
            .find(|enemy| enemy.collision_box(config).overlaps(&player_box));

        if let Some(enemy) = hit {
            enemy.destroy();
            self.player.lose_life();
            info!(
                column = enemy.column,
                lives = self.player.lives,
                "player hit"
            );
            presenter.update_lives(LivesDisplay::from_lives(self.player.lives));
        }

        self.player.is_dead()
    }
}
