use glam::Vec2;
use ratatui::style::Color;

use super::enemy::Enemy;
use super::projectile::Projectile;
use crate::config::{MeleeStats, Playfield, RangedStats};
use crate::surface::{Paint, Surface};

/// Where the wielder stands and which way it faces. Handed to the weapon on
/// every call instead of the weapon holding on to its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

impl Pose {
    /// Point `distance` units ahead of the wielder.
    pub fn ahead(&self, distance: f32) -> Vec2 {
        self.position + Vec2::from_angle(self.angle) * distance
    }
}

/// Frame counter gating repeated attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    pub remaining: u32,
    pub period: u32,
}

impl Cooldown {
    pub fn new(period: u32) -> Self {
        Self {
            remaining: 0,
            period,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    pub fn trigger(&mut self) {
        self.remaining = self.period;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeleeWeapon {
    pub cooldown: Cooldown,
    pub range: f32,
    pub damage: u32,
}

impl MeleeWeapon {
    pub fn new(stats: MeleeStats) -> Self {
        Self {
            cooldown: Cooldown::new(stats.cooldown),
            range: stats.range,
            damage: stats.damage,
        }
    }

    /// One instantaneous area check centred `range` ahead of the wielder.
    fn attack(&mut self, owner: Pose, enemies: &mut [Enemy]) {
        if !self.cooldown.is_ready() {
            return;
        }

        let strike = owner.ahead(self.range);
        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            if enemy.position().distance(strike) < self.range {
                enemy.take_damage(self.damage);
            }
        }

        // Whiffs cost the full cooldown too
        self.cooldown.trigger();
    }

    fn draw<S: Surface>(&self, owner: Pose, surface: &mut S) {
        surface.circle(
            owner.ahead(self.range),
            self.range,
            Paint::Stroke(Color::Red),
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangedWeapon {
    pub cooldown: Cooldown,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub muzzle_offset: f32,
    pub damage: u32,
    pub projectiles: Vec<Projectile>,
}

impl RangedWeapon {
    pub fn new(stats: RangedStats) -> Self {
        Self {
            cooldown: Cooldown::new(stats.cooldown),
            bullet_speed: stats.bullet_speed,
            bullet_radius: stats.bullet_radius,
            muzzle_offset: stats.muzzle_offset,
            damage: stats.damage,
            projectiles: Vec::new(),
        }
    }

    fn attack(&mut self, owner: Pose) {
        if !self.cooldown.is_ready() {
            return;
        }

        self.projectiles.push(Projectile::new(
            owner.ahead(self.muzzle_offset),
            owner.angle,
            self.bullet_speed,
            self.bullet_radius,
            self.damage,
        ));
        self.cooldown.trigger();
    }

    fn update(&mut self, enemies: &mut [Enemy], field: Playfield) {
        for projectile in &mut self.projectiles {
            projectile.update(enemies, field);
        }
        self.projectiles.retain(|p| !p.dead);
    }

    fn draw<S: Surface>(&self, surface: &mut S) {
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Weapon {
    Melee(MeleeWeapon),
    Ranged(RangedWeapon),
}

impl Weapon {
    pub fn get_name(&self) -> &'static str {
        match self {
            Weapon::Melee(_) => "Machete",
            Weapon::Ranged(_) => "Pistol",
        }
    }

    pub fn cooldown(&self) -> &Cooldown {
        match self {
            Weapon::Melee(melee) => &melee.cooldown,
            Weapon::Ranged(ranged) => &ranged.cooldown,
        }
    }

    fn cooldown_mut(&mut self) -> &mut Cooldown {
        match self {
            Weapon::Melee(melee) => &mut melee.cooldown,
            Weapon::Ranged(ranged) => &mut ranged.cooldown,
        }
    }

    pub fn can_attack(&self) -> bool {
        self.cooldown().is_ready()
    }

    /// Does nothing while cooling down.
    pub fn attack(&mut self, owner: Pose, enemies: &mut [Enemy]) {
        match self {
            Weapon::Melee(melee) => melee.attack(owner, enemies),
            Weapon::Ranged(ranged) => ranged.attack(owner),
        }
    }

    /// Per-frame bookkeeping: cooldown first, then any projectiles in flight.
    pub fn update(&mut self, enemies: &mut [Enemy], field: Playfield) {
        self.cooldown_mut().tick();
        if let Weapon::Ranged(ranged) = self {
            ranged.update(enemies, field);
        }
    }

    pub fn draw<S: Surface>(&self, owner: Pose, surface: &mut S) {
        match self {
            Weapon::Melee(melee) => melee.draw(owner, surface),
            Weapon::Ranged(ranged) => ranged.draw(surface),
        }
    }

    /// Projectiles in flight; always empty for melee.
    pub fn projectiles(&self) -> &[Projectile] {
        match self {
            Weapon::Melee(_) => &[],
            Weapon::Ranged(ranged) => &ranged.projectiles,
        }
    }
}
