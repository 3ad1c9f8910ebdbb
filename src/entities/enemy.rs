use glam::Vec2;
use ratatui::style::Color;

use super::body::Body;
use super::player::Player;
use crate::config::ActorStats;
use crate::surface::{Paint, Surface};

/// Chaser that walks straight at the player and is consumed on contact.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
}

impl Enemy {
    pub fn new(position: Vec2, stats: ActorStats) -> Self {
        Self {
            body: Body::new(position, stats),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    /// Steps toward the player and resolves contact. Returns `true` when the
    /// contact was the player's killing blow.
    pub fn update(&mut self, player: &mut Player) -> bool {
        if self.body.dead {
            return false;
        }

        let delta = player.position() - self.body.position;
        let distance = delta.length();

        if distance > 0.0 {
            self.body.position += delta / distance * self.body.speed;
        }

        // Contact uses the distance measured before this frame's step
        if distance < self.body.radius + player.body.radius {
            let fatal = player.take_damage();
            self.body.dead = true;
            return fatal;
        }

        false
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.body.take_damage(amount);
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        if self.body.dead {
            return;
        }
        surface.circle(self.body.position, self.body.radius, Paint::Fill(Color::Red));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::surface::DrawList;

    fn setup(enemy_pos: Vec2) -> (Enemy, Player) {
        let config = GameConfig::default();
        let player = Player::new(&config);
        (Enemy::new(enemy_pos, config.enemy), player)
    }

    #[test]
    fn test_enemy_walks_toward_player() {
        let (mut enemy, mut player) = setup(Vec2::new(100.0, 300.0));
        enemy.update(&mut player);
        assert!(enemy.position().distance(Vec2::new(101.5, 300.0)) < 1e-4);
        assert_eq!(player.body.health, 3);
    }

    #[test]
    fn test_enemy_on_player_does_not_move_but_hits() {
        let (mut enemy, mut player) = setup(Vec2::new(400.0, 300.0));
        enemy.update(&mut player);
        assert_eq!(enemy.position(), Vec2::new(400.0, 300.0));
        assert!(enemy.body.dead);
        assert_eq!(player.body.health, 2);
    }

    #[test]
    fn test_contact_damages_exactly_once() {
        let (mut enemy, mut player) = setup(Vec2::new(420.0, 300.0));
        enemy.update(&mut player);
        enemy.update(&mut player);
        enemy.update(&mut player);
        assert!(enemy.body.dead);
        assert_eq!(player.body.health, 2);
    }

    #[test]
    fn test_contact_reports_killing_blow() {
        let (mut enemy, mut player) = setup(Vec2::new(410.0, 300.0));
        player.body.health = 1;
        assert!(enemy.update(&mut player));
        assert!(player.body.dead);
    }

    #[test]
    fn test_enemy_dies_from_damage() {
        let (mut enemy, _) = setup(Vec2::new(100.0, 100.0));
        enemy.take_damage(1);
        assert!(enemy.is_alive());
        enemy.take_damage(1);
        assert!(!enemy.is_alive());
        assert_eq!(enemy.body.health, 0);
    }

    #[test]
    fn test_dead_enemy_is_not_drawn() {
        let (mut enemy, _) = setup(Vec2::new(100.0, 100.0));
        let mut list = DrawList::new();
        enemy.draw(&mut list);
        assert_eq!(list.commands().len(), 1);

        enemy.body.dead = true;
        let mut list = DrawList::new();
        enemy.draw(&mut list);
        assert!(list.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_step_is_exactly_speed(
                x in 0.0f32..800.0,
                y in 0.0f32..600.0,
            ) {
                let (mut enemy, mut player) = setup(Vec2::new(x, y));
                let before = enemy.position().distance(player.position());
                enemy.update(&mut player);
                let after = enemy.position().distance(player.position());
                prop_assert!(after <= (before - enemy.body.speed).abs() + 1e-3);
            }
        }
    }
}
