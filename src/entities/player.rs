use glam::Vec2;
use ratatui::style::Color;

use super::body::Body;
use super::enemy::Enemy;
use super::weapon::{MeleeWeapon, Pose, RangedWeapon, Weapon};
use crate::config::{GameConfig, Playfield};
use crate::input::{InputSnapshot, Key};
use crate::surface::{Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Radians, pointing from the player at the pointer
    pub angle: f32,
    pub weapons: Vec<Weapon>,
    pub current_weapon: usize,
}

impl Player {
    /// Fresh player in the middle of the field, holding every weapon.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            body: Body::new(config.playfield.center(), config.player),
            angle: 0.0,
            weapons: vec![
                Weapon::Melee(MeleeWeapon::new(config.melee)),
                Weapon::Ranged(RangedWeapon::new(config.ranged)),
            ],
            current_weapon: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.body.position,
            angle: self.angle,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapons[self.current_weapon]
    }

    pub fn update(&mut self, input: &mut InputSnapshot, enemies: &mut [Enemy], field: Playfield) {
        // Axes are independent, so diagonals cover more ground
        let speed = self.body.speed;
        if input.is_key_down(Key::Up) {
            self.body.position.y -= speed;
        }
        if input.is_key_down(Key::Down) {
            self.body.position.y += speed;
        }
        if input.is_key_down(Key::Left) {
            self.body.position.x -= speed;
        }
        if input.is_key_down(Key::Right) {
            self.body.position.x += speed;
        }
        self.body.position = field.clamp_circle(self.body.position, self.body.radius);

        let aim = input.pointer_position() - self.body.position;
        self.angle = aim.y.atan2(aim.x);

        if input.is_pointer_down() {
            let pose = self.pose();
            self.weapons[self.current_weapon].attack(pose, enemies);
        }

        if input.is_key_down(Key::SwitchWeapon) {
            self.switch_weapon();
            // Held key must not switch again next frame
            input.release(Key::SwitchWeapon);
        }

        self.weapons[self.current_weapon].update(enemies, field);
    }

    pub fn switch_weapon(&mut self) {
        self.current_weapon = (self.current_weapon + 1) % self.weapons.len();
        log::debug!("switched to {}", self.weapon().get_name());
    }

    /// Loses one health point. Returns `true` only for the hit that kills.
    pub fn take_damage(&mut self) -> bool {
        self.body.take_damage(1)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        let radius = self.body.radius;
        surface.with_transform(self.body.position, self.angle, |s| {
            s.circle(Vec2::ZERO, radius, Paint::Fill(Color::Cyan));
            s.rect(
                Vec2::new(0.0, -5.0),
                Vec2::new(25.0, 10.0),
                Paint::Fill(Color::Yellow),
            );
        });

        self.weapon().draw(self.pose(), surface);

        for i in 0..self.body.health {
            surface.rect(
                Vec2::new(10.0 + i as f32 * 30.0, 10.0),
                Vec2::new(20.0, 20.0),
                Paint::Fill(Color::Red),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};

    fn setup() -> (Player, InputSnapshot, GameConfig) {
        let config = GameConfig::default();
        let player = Player::new(&config);
        let mut input = InputSnapshot::default();
        // Aim right by default so nothing depends on the zero pointer
        input.set_pointer_position(Vec2::new(500.0, 300.0));
        (player, input, config)
    }

    #[test]
    fn test_player_new() {
        let (player, _, _) = setup();
        assert_eq!(player.position(), Vec2::new(400.0, 300.0));
        assert_eq!(player.body.health, 3);
        assert_eq!(player.weapons.len(), 2);
        assert_eq!(player.weapon().get_name(), "Machete");
    }

    #[test]
    fn test_player_movement_axes() {
        let (mut player, mut input, config) = setup();
        input.press(Key::Up);
        player.update(&mut input, &mut [], config.playfield);
        assert_eq!(player.position(), Vec2::new(400.0, 297.0));

        input.release(Key::Up);
        input.press(Key::Right);
        player.update(&mut input, &mut [], config.playfield);
        assert_eq!(player.position(), Vec2::new(403.0, 297.0));
    }

    #[test]
    fn test_diagonal_movement_is_not_normalized() {
        let (mut player, mut input, config) = setup();
        input.press(Key::Down);
        input.press(Key::Left);
        player.update(&mut input, &mut [], config.playfield);
        assert_eq!(player.position(), Vec2::new(397.0, 303.0));
    }

    #[test]
    fn test_player_clamped_to_field() {
        let (mut player, mut input, config) = setup();
        player.body.position = Vec2::new(16.0, 584.0);
        input.press(Key::Left);
        input.press(Key::Down);
        player.update(&mut input, &mut [], config.playfield);
        assert_eq!(player.position(), Vec2::new(15.0, 585.0));
    }

    #[test]
    fn test_player_faces_pointer() {
        let (mut player, mut input, config) = setup();
        player.update(&mut input, &mut [], config.playfield);
        assert_eq!(player.angle, 0.0);

        input.set_pointer_position(Vec2::new(400.0, 400.0));
        player.update(&mut input, &mut [], config.playfield);
        assert!((player.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_held_switch_key_switches_once() {
        let (mut player, mut input, config) = setup();
        input.press(Key::SwitchWeapon);
        for _ in 0..10 {
            player.update(&mut input, &mut [], config.playfield);
        }
        assert_eq!(player.current_weapon, 1);
        assert!(!input.is_key_down(Key::SwitchWeapon));
    }

    #[test]
    fn test_switch_wraps_around() {
        let (mut player, _, _) = setup();
        player.switch_weapon();
        player.switch_weapon();
        assert_eq!(player.current_weapon, 0);
    }

    #[test]
    fn test_held_pointer_fires_on_cooldown() {
        let (mut player, mut input, config) = setup();
        player.switch_weapon();
        input.set_pointer_down(true);
        player.update(&mut input, &mut [], config.playfield);
        assert_eq!(player.weapon().projectiles().len(), 1);
        player.update(&mut input, &mut [], config.playfield);
        assert_eq!(player.weapon().projectiles().len(), 1);
    }

    #[test]
    fn test_take_damage_reports_death_once() {
        let (mut player, _, _) = setup();
        assert!(!player.take_damage());
        assert!(!player.take_damage());
        assert!(player.take_damage());
        assert!(!player.take_damage());
        assert_eq!(player.body.health, 0);
    }

    #[test]
    fn test_draw_health_pips() {
        let (mut player, _, _) = setup();
        player.take_damage();
        let mut list = DrawList::new();
        player.draw(&mut list);
        // body, glyph, melee ring, two pips
        assert_eq!(list.commands().len(), 5);
        let DrawCommand::Polygon { points, .. } = &list.commands()[4] else {
            panic!("expected a pip");
        };
        assert_eq!(points[0], Vec2::new(40.0, 10.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_key() -> impl Strategy<Value = Key> {
            prop::sample::select(vec![Key::Up, Key::Down, Key::Left, Key::Right])
        }

        proptest! {
            #[test]
            fn test_player_stays_in_bounds(
                moves in prop::collection::vec(prop::collection::vec(any_key(), 0..4), 0..400)
            ) {
                let (mut player, mut input, config) = setup();
                for frame in moves {
                    for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
                        input.release(key);
                    }
                    for key in frame {
                        input.press(key);
                    }
                    player.update(&mut input, &mut [], config.playfield);
                }
                let p = player.position();
                prop_assert!(p.x >= 15.0 && p.x <= 785.0);
                prop_assert!(p.y >= 15.0 && p.y <= 585.0);
            }
        }
    }
}
