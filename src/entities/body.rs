use glam::Vec2;

use crate::config::ActorStats;

/// Fields every actor carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub radius: f32,
    /// Units per frame
    pub speed: f32,
    pub health: u32,
    pub dead: bool,
}

impl Body {
    pub fn new(position: Vec2, stats: ActorStats) -> Self {
        Self {
            position,
            radius: stats.radius,
            speed: stats.speed,
            health: stats.health,
            dead: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Whether two circles overlap (strictly closer than their radii sum).
    pub fn touches(&self, point: Vec2, radius: f32) -> bool {
        self.position.distance(point) < self.radius + radius
    }

    /// Saturating decrement. Returns `true` only on the hit that kills.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.dead {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.dead = true;
            return true;
        }
        false
    }
}
