mod body;
mod enemy;
mod game_state;
mod player;
mod projectile;
mod weapon;

// Re-export all public types
pub use body::Body;
pub use enemy::Enemy;
pub use game_state::GameState;
pub use player::Player;
pub use projectile::Projectile;
pub use weapon::{Cooldown, MeleeWeapon, Pose, RangedWeapon, Weapon};
