//! Drawing interface the simulation issues its draw calls against, plus a
//! recording implementation the terminal renderer replays.

use glam::{Mat2, Vec2};
use ratatui::style::Color;

use crate::config::Playfield;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke(Color),
}

impl Paint {
    pub fn color(&self) -> Color {
        match self {
            Paint::Fill(color) | Paint::Stroke(color) => *color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
}

/// Text is always anchored at its horizontal centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: TextSize,
}

impl TextStyle {
    pub fn new(color: Color, size: TextSize) -> Self {
        Self { color, size }
    }
}

/// Primitive 2D drawing operations in playfield coordinates.
pub trait Surface {
    fn clear(&mut self, bounds: Playfield);
    fn circle(&mut self, center: Vec2, radius: f32, paint: Paint);
    fn rect(&mut self, origin: Vec2, size: Vec2, paint: Paint);
    fn text(&mut self, text: &str, position: Vec2, style: TextStyle);
    fn push_transform(&mut self, translate: Vec2, rotate: f32);
    fn pop_transform(&mut self);

    /// Runs `draw` with a translate-then-rotate transform applied, restoring
    /// the previous transform afterwards.
    fn with_transform<F>(&mut self, translate: Vec2, rotate: f32, draw: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        self.push_transform(translate, rotate);
        draw(self);
        self.pop_transform();
    }
}

/// A draw call resolved to absolute playfield coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Playfield),
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    /// Rectangles become polygons once a rotation is involved.
    Polygon {
        points: [Vec2; 4],
        paint: Paint,
    },
    Text {
        text: String,
        position: Vec2,
        style: TextStyle,
    },
}

#[derive(Debug, Clone, Copy)]
struct Transform {
    translate: Vec2,
    rotate: Mat2,
}

impl Transform {
    const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        rotate: Mat2::IDENTITY,
    };

    fn apply(&self, point: Vec2) -> Vec2 {
        self.translate + self.rotate * point
    }

    fn then(&self, translate: Vec2, rotate: f32) -> Self {
        Self {
            translate: self.apply(translate),
            rotate: self.rotate * Mat2::from_angle(rotate),
        }
    }
}

/// Records every call as a [`DrawCommand`].
#[derive(Debug, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    stack: Vec<Transform>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn current(&self) -> Transform {
        self.stack.last().copied().unwrap_or(Transform::IDENTITY)
    }
}

impl Surface for DrawList {
    fn clear(&mut self, bounds: Playfield) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(bounds));
    }

    fn circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        let center = self.current().apply(center);
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint,
        });
    }

    fn rect(&mut self, origin: Vec2, size: Vec2, paint: Paint) {
        let t = self.current();
        let points = [
            t.apply(origin),
            t.apply(origin + Vec2::new(size.x, 0.0)),
            t.apply(origin + size),
            t.apply(origin + Vec2::new(0.0, size.y)),
        ];
        self.commands.push(DrawCommand::Polygon { points, paint });
    }

    fn text(&mut self, text: &str, position: Vec2, style: TextStyle) {
        let position = self.current().apply(position);
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            style,
        });
    }

    fn push_transform(&mut self, translate: Vec2, rotate: f32) {
        let next = self.current().then(translate, rotate);
        self.stack.push(next);
    }

    fn pop_transform(&mut self) {
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_clear_drops_previous_frame() {
        let mut list = DrawList::new();
        list.circle(Vec2::ZERO, 1.0, Paint::Fill(Color::Red));
        list.clear(Playfield::new(10.0, 10.0));
        assert_eq!(list.commands().len(), 1);
        assert!(matches!(list.commands()[0], DrawCommand::Clear(_)));
    }

    #[test]
    fn test_scoped_transform_translates_and_rotates() {
        let mut list = DrawList::new();
        list.with_transform(Vec2::new(100.0, 50.0), FRAC_PI_2, |s| {
            s.circle(Vec2::new(10.0, 0.0), 2.0, Paint::Fill(Color::Cyan));
        });
        // Outside the scope the identity is back
        list.circle(Vec2::new(10.0, 0.0), 2.0, Paint::Fill(Color::Cyan));

        match (&list.commands()[0], &list.commands()[1]) {
            (
                DrawCommand::Circle { center: a, .. },
                DrawCommand::Circle { center: b, .. },
            ) => {
                assert!(approx(*a, Vec2::new(100.0, 60.0)));
                assert!(approx(*b, Vec2::new(10.0, 0.0)));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn test_rect_becomes_rotated_polygon() {
        let mut list = DrawList::new();
        list.with_transform(Vec2::ZERO, FRAC_PI_2, |s| {
            s.rect(Vec2::ZERO, Vec2::new(4.0, 2.0), Paint::Fill(Color::Yellow));
        });
        let DrawCommand::Polygon { points, .. } = &list.commands()[0] else {
            panic!("expected polygon");
        };
        assert!(approx(points[1], Vec2::new(0.0, 4.0)));
        assert!(approx(points[2], Vec2::new(-2.0, 4.0)));
    }

    #[test]
    fn test_nested_transforms_compose() {
        let mut list = DrawList::new();
        list.with_transform(Vec2::new(10.0, 0.0), FRAC_PI_2, |s| {
            s.with_transform(Vec2::new(5.0, 0.0), 0.0, |s| {
                s.text("x", Vec2::ZERO, TextStyle::new(Color::White, TextSize::Normal));
            });
        });
        let DrawCommand::Text { position, .. } = &list.commands()[0] else {
            panic!("expected text");
        };
        assert!(approx(*position, Vec2::new(10.0, 5.0)));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["x"]);
    }
}
