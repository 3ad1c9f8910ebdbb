//! Simulation loop: owns every piece of game state and steps it one tick at a
//! time, update first, then draw.

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::style::Color;

use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, Player};
use crate::input::InputSnapshot;
use crate::surface::{Surface, TextSize, TextStyle};
use crate::wave::WaveManager;

pub struct World {
    config: GameConfig,
    state: GameState,
    player: Player,
    waves: WaveManager,
    rng: StdRng,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            player: Player::new(&config),
            waves: WaveManager::new(),
            state: GameState::NotStarted,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level(&self) -> u32 {
        self.waves.level()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.waves.enemies()
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        self.waves.enemies_mut()
    }

    pub fn alive_enemies(&self) -> usize {
        self.waves.alive_count()
    }

    /// NotStarted -> Playing. Returns `false` when the signal is ignored.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::NotStarted {
            return false;
        }
        self.reset();
        log::info!("game started at level {}", self.level());
        true
    }

    /// Over -> Playing. The level reached is kept, only the player is fresh.
    pub fn restart(&mut self) -> bool {
        if self.state != GameState::Over {
            return false;
        }
        self.reset();
        log::info!("game restarted at level {}", self.level());
        true
    }

    fn reset(&mut self) {
        self.player = Player::new(&self.config);
        let level = self.waves.level();
        self.waves
            .spawn_enemies(level, self.player.position(), &self.config, &mut self.rng);
        self.state = GameState::Playing;
    }

    /// Update phase. Only runs while playing.
    pub fn update(&mut self, input: &mut InputSnapshot) {
        if self.state != GameState::Playing {
            return;
        }

        self.player
            .update(input, self.waves.enemies_mut(), self.config.playfield);

        for enemy in self.waves.enemies_mut() {
            if enemy.update(&mut self.player) {
                self.state = GameState::Over;
            }
        }

        if self.state == GameState::Over {
            log::info!("game over at level {}", self.level());
        }

        self.waves
            .advance_if_cleared(self.player.position(), &self.config, &mut self.rng);
    }

    /// Draw phase. Read-only; Over keeps the last frame and adds the overlay.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        if self.state == GameState::NotStarted {
            return;
        }

        surface.clear(self.config.playfield);
        self.player.draw(surface);
        for enemy in self.waves.enemies() {
            enemy.draw(surface);
        }

        if self.state == GameState::Over {
            let center = self.config.playfield.center();
            surface.text(
                "Game Over!",
                center,
                TextStyle::new(Color::White, TextSize::Large),
            );
            surface.text(
                "Press R to restart",
                center + Vec2::new(0.0, 40.0),
                TextStyle::new(Color::White, TextSize::Normal),
            );
        }
    }

    /// One full tick: update, then draw.
    pub fn tick<S: Surface>(&mut self, input: &mut InputSnapshot, surface: &mut S) {
        self.update(input);
        self.draw(surface);
    }
}
