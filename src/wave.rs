use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::Enemy;

/// Owns the current level and the enemies spawned for it.
#[derive(Debug, Clone)]
pub struct WaveManager {
    level: u32,
    enemies: Vec<Enemy>,
}

impl Default for WaveManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveManager {
    pub fn new() -> Self {
        Self {
            level: 1,
            enemies: Vec::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn alive_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }

    /// Replaces the whole wave with `level * enemies_per_level` fresh enemies,
    /// each kept away from the player.
    pub fn spawn_enemies<R: Rng>(
        &mut self,
        level: u32,
        player_position: Vec2,
        config: &GameConfig,
        rng: &mut R,
    ) {
        let count = level * config.enemies_per_level;
        self.enemies = (0..count)
            .map(|_| {
                let position = spawn_position(player_position, config, rng);
                Enemy::new(position, config.enemy)
            })
            .collect();
    }

    /// Moves straight on to the next level once every enemy is dead.
    /// Returns whether the level advanced.
    pub fn advance_if_cleared<R: Rng>(
        &mut self,
        player_position: Vec2,
        config: &GameConfig,
        rng: &mut R,
    ) -> bool {
        if !self.is_cleared() {
            return false;
        }

        self.level += 1;
        self.spawn_enemies(self.level, player_position, config, rng);
        log::info!(
            "level {} reached, {} enemies incoming",
            self.level,
            self.enemies.len()
        );
        true
    }
}

/// Uniform point on the playfield at least `spawn_clearance` from the player.
/// Gives up after `max_spawn_attempts` and settles for the farthest candidate.
fn spawn_position<R: Rng>(player: Vec2, config: &GameConfig, rng: &mut R) -> Vec2 {
    let field = config.playfield;
    let mut best = None::<(Vec2, f32)>;

    for _ in 0..config.max_spawn_attempts.max(1) {
        let candidate = Vec2::new(
            rng.random::<f32>() * field.width,
            rng.random::<f32>() * field.height,
        );
        let distance = candidate.distance(player);
        if distance >= config.spawn_clearance {
            return candidate;
        }
        if best.is_none_or(|(_, d)| distance > d) {
            best = Some((candidate, distance));
        }
    }

    log::warn!(
        "no spawn point {} units from the player after {} attempts",
        config.spawn_clearance,
        config.max_spawn_attempts
    );
    best.map(|(p, _)| p).unwrap_or(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Playfield;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_wave_size_scales_with_level() {
        let config = GameConfig::default();
        let mut waves = WaveManager::new();
        for level in 1..=4 {
            waves.spawn_enemies(level, config.playfield.center(), &config, &mut rng());
            assert_eq!(waves.enemies().len(), level as usize * 5);
            assert_eq!(waves.alive_count(), level as usize * 5);
        }
    }

    #[test]
    fn test_spawns_respect_clearance() {
        let config = GameConfig::default();
        let player = config.playfield.center();
        let mut waves = WaveManager::new();
        waves.spawn_enemies(10, player, &config, &mut rng());
        for enemy in waves.enemies() {
            assert!(enemy.position().distance(player) >= 100.0);
            assert!(config.playfield.contains(enemy.position()));
        }
    }

    #[test]
    fn test_tiny_arena_spawn_terminates() {
        let config = GameConfig {
            playfield: Playfield::new(50.0, 50.0),
            max_spawn_attempts: 50,
            ..GameConfig::default()
        };
        let mut waves = WaveManager::new();
        waves.spawn_enemies(1, Vec2::new(25.0, 25.0), &config, &mut rng());
        assert_eq!(waves.enemies().len(), 5);
        for enemy in waves.enemies() {
            assert!(config.playfield.contains(enemy.position()));
        }
    }

    #[test]
    fn test_advances_only_when_all_dead() {
        let config = GameConfig::default();
        let player = config.playfield.center();
        let mut rng = rng();
        let mut waves = WaveManager::new();
        waves.spawn_enemies(1, player, &config, &mut rng);

        for enemy in waves.enemies_mut().iter_mut().skip(1) {
            enemy.body.dead = true;
        }
        assert!(!waves.advance_if_cleared(player, &config, &mut rng));
        assert_eq!(waves.level(), 1);

        waves.enemies_mut()[0].body.dead = true;
        assert!(waves.advance_if_cleared(player, &config, &mut rng));
        assert_eq!(waves.level(), 2);
        assert_eq!(waves.enemies().len(), 10);
        assert!(!waves.is_cleared());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_spawn_clearance_anywhere(
                seed in any::<u64>(),
                x in 0.0f32..800.0,
                y in 0.0f32..600.0,
            ) {
                let config = GameConfig::default();
                let player = Vec2::new(x, y);
                let mut rng = StdRng::seed_from_u64(seed);
                let mut waves = WaveManager::new();
                waves.spawn_enemies(2, player, &config, &mut rng);
                for enemy in waves.enemies() {
                    prop_assert!(enemy.position().distance(player) >= 100.0);
                }
            }
        }
    }
}
