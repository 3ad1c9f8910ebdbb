use glam::Vec2;
use ratatui::style::Color;

use super::enemy::Enemy;
use crate::config::Playfield;
use crate::surface::{Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Direction of travel in radians
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub damage: u32,
    pub dead: bool,
}

impl Projectile {
    pub fn new(position: Vec2, angle: f32, speed: f32, radius: f32, damage: u32) -> Self {
        Self {
            position,
            angle,
            speed,
            radius,
            damage,
            dead: false,
        }
    }

    /// Moves one frame, then culls against the playfield before testing for
    /// hits so a projectile leaving the field can never also strike.
    pub fn update(&mut self, enemies: &mut [Enemy], field: Playfield) {
        if self.dead {
            return;
        }

        self.position += Vec2::from_angle(self.angle) * self.speed;

        if !field.contains(self.position) {
            self.dead = true;
            return;
        }

        // First live enemy in storage order wins, not the nearest one
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.body.touches(self.position, self.radius))
        {
            enemy.take_damage(self.damage);
            self.dead = true;
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.circle(self.position, self.radius, Paint::Fill(Color::Yellow));
    }
}
