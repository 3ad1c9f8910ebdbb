use color_eyre::eyre::{Result, WrapErr, bail};
use glam::Vec2;

/// Rectangular area entities are clamped and culled against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Bounds are inclusive: a point exactly on the edge is still inside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Keeps a circle of `radius` inside the field. When the field is narrower
    /// than the circle the lower bound wins.
    pub fn clamp_circle(&self, point: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            radius.max((self.width - radius).min(point.x)),
            radius.max((self.height - radius).min(point.y)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorStats {
    pub radius: f32,
    pub speed: f32,
    pub health: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeStats {
    pub cooldown: u32,
    pub range: f32,
    pub damage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedStats {
    pub cooldown: u32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub muzzle_offset: f32,
    pub damage: u32,
}

/// Every gameplay tunable in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub playfield: Playfield,
    pub player: ActorStats,
    pub enemy: ActorStats,
    pub melee: MeleeStats,
    pub ranged: RangedStats,
    /// Wave size is `level * enemies_per_level`
    pub enemies_per_level: u32,
    /// Minimum distance between a fresh enemy and the player
    pub spawn_clearance: f32,
    pub max_spawn_attempts: u32,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::new(800.0, 600.0),
            player: ActorStats {
                radius: 15.0,
                speed: 3.0,
                health: 3,
            },
            enemy: ActorStats {
                radius: 15.0,
                speed: 1.5,
                health: 2,
            },
            melee: MeleeStats {
                cooldown: 20,
                range: 40.0,
                damage: 1,
            },
            ranged: RangedStats {
                cooldown: 15,
                bullet_speed: 7.0,
                bullet_radius: 5.0,
                muzzle_offset: 20.0,
                damage: 1,
            },
            enemies_per_level: 5,
            spawn_clearance: 100.0,
            max_spawn_attempts: 1000,
            seed: None,
        }
    }
}

pub const SEED_VAR: &str = "ARENA_RUSH_SEED";
pub const WIDTH_VAR: &str = "ARENA_RUSH_WIDTH";
pub const HEIGHT_VAR: &str = "ARENA_RUSH_HEIGHT";

impl GameConfig {
    /// Defaults with overrides from the `ARENA_RUSH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GameConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_VAR) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .wrap_err_with(|| format!("{SEED_VAR} must be an unsigned integer, got {raw:?}"))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = lookup(WIDTH_VAR) {
            config.playfield.width = parse_dimension(WIDTH_VAR, &raw)?;
        }
        if let Some(raw) = lookup(HEIGHT_VAR) {
            config.playfield.height = parse_dimension(HEIGHT_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_dimension(name: &str, raw: &str) -> Result<f32> {
    let value = raw
        .trim()
        .parse::<f32>()
        .wrap_err_with(|| format!("{name} must be a number, got {raw:?}"))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("{name} must be a positive number, got {value}");
    }
    Ok(value)
}
