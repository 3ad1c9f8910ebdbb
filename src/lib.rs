// Library exports for the binary and for testing
pub use config::{GameConfig, Playfield};
pub use entities::{
    Body, Cooldown, Enemy, GameState, MeleeWeapon, Player, Pose, Projectile, RangedWeapon, Weapon,
};
pub use input::{InputAction, InputManager, InputSnapshot, Key};
pub use surface::{DrawCommand, DrawList, Paint, Surface, TextSize, TextStyle};
pub use wave::WaveManager;
pub use world::World;

pub mod app;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod surface;
pub mod wave;
pub mod world;
