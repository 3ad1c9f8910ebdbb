use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    },
};

use crate::config::Playfield;
use crate::entities::GameState;
use crate::surface::{DrawCommand, DrawList, Paint, TextSize};

/// Where the playfield sits on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub playfield: Playfield,
}

impl Viewport {
    pub fn new(area: Rect, playfield: Playfield) -> Self {
        Self { area, playfield }
    }

    /// Maps a cell to the playfield point under its centre. Cells outside the
    /// canvas map outside the playfield.
    pub fn to_playfield(&self, column: u16, row: u16) -> Vec2 {
        let col = column as f32 - self.area.x as f32 + 0.5;
        let row = row as f32 - self.area.y as f32 + 0.5;
        Vec2::new(
            col * self.playfield.width / self.area.width.max(1) as f32,
            row * self.playfield.height / self.area.height.max(1) as f32,
        )
    }

    /// Playfield units covered by one braille dot (2x4 per cell).
    fn dot_size(&self) -> Vec2 {
        Vec2::new(
            self.playfield.width / (self.area.width.max(1) as f32 * 2.0),
            self.playfield.height / (self.area.height.max(1) as f32 * 4.0),
        )
    }

    fn cell_width(&self) -> f32 {
        self.playfield.width / self.area.width.max(1) as f32
    }
}

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub draw_list: &'a DrawList,
    pub playfield: Playfield,
    pub level: u32,
    pub enemies_alive: usize,
    pub health: u32,
    pub weapon_name: &'static str,
    pub fps: u32,
    pub area: Rect,
}

/// Replays the simulation's draw list onto a braille canvas
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Canvas placement for a terminal of size `area`: one HUD row on top,
    /// one controls row at the bottom, a bordered canvas in between.
    pub fn viewport(&self, area: Rect, playfield: Playfield) -> Viewport {
        Viewport::new(Self::canvas_block().inner(Self::game_area(area)), playfield)
    }

    fn game_area(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y + 1u16.min(area.height),
            width: area.width,
            height: area.height.saturating_sub(2),
        }
    }

    fn canvas_block() -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::NotStarted => self.render_menu(frame, view),
            GameState::Playing | GameState::Over => self.render_game(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let viewport = self.viewport(area, view.playfield);
        let game_area = Self::game_area(area);

        frame.render_widget(Self::canvas_block(), game_area);

        let height = view.playfield.height;
        let step = viewport.dot_size().min_element().max(0.5);
        let cell_width = viewport.cell_width();
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, view.playfield.width as f64])
            .y_bounds([0.0, height as f64])
            .paint(|ctx| {
                for command in view.draw_list.commands() {
                    paint_command(ctx, command, height, step, cell_width);
                }
            });
        frame.render_widget(canvas, viewport.area);

        let health_color = if view.health > 2 {
            Color::Green
        } else if view.health > 1 {
            Color::Yellow
        } else {
            Color::Red
        };
        let health_style = Style::default()
            .fg(health_color)
            .add_modifier(Modifier::BOLD);

        let stats = Line::from(vec![
            Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.level),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  HP: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", view.health), health_style),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.enemies_alive),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Weapon: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.weapon_name,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1u16.min(area.width),
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Mouse: Aim/Attack] [Q: Switch weapon] [Esc: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        if area.height > 1 {
            let controls_area = Rect {
                x: area.x + 1u16.min(area.width),
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(Paragraph::new(controls).centered(), controls_area);
        }
    }

    fn render_menu(&self, frame: &mut Frame, view: &RenderView) {
        let menu_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().cyan(),
            Line::from("║        ARENA RUSH         ║")
                .centered()
                .cyan()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().cyan(),
            Line::from(""),
            Line::from("Survive endless waves of chasers")
                .centered()
                .yellow(),
            Line::from(""),
            Line::from("WASD / Arrows  move").centered().white(),
            Line::from("Mouse          aim, hold to attack").centered().white(),
            Line::from("Q              switch weapon").centered().white(),
            Line::from(""),
            Line::from("Press Enter to start").centered().green().bold(),
            Line::from("Press Esc to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(menu_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

/// Canvas y grows upward, the playfield's grows downward.
fn flip(point: Vec2, height: f32) -> (f64, f64) {
    (point.x as f64, (height - point.y) as f64)
}

fn paint_command(ctx: &mut Context, command: &DrawCommand, height: f32, step: f32, cell_width: f32) {
    match command {
        // The canvas starts blank every frame
        DrawCommand::Clear(_) => {}
        DrawCommand::Circle {
            center,
            radius,
            paint,
        } => {
            let (x, y) = flip(*center, height);
            let color = paint.color();
            ctx.draw(&Circle {
                x,
                y,
                radius: *radius as f64,
                color,
            });
            if let Paint::Fill(_) = paint {
                let mut r = *radius - step;
                while r > 0.0 {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: r as f64,
                        color,
                    });
                    r -= step;
                }
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
            }
        }
        DrawCommand::Polygon { points, paint } => {
            let color = paint.color();
            for i in 0..points.len() {
                let (x1, y1) = flip(points[i], height);
                let (x2, y2) = flip(points[(i + 1) % points.len()], height);
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
            }
            if let Paint::Fill(_) = paint {
                let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
                let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
                let mut y = min_y;
                while y <= max_y {
                    if let Some((left, right)) = scanline(points, y) {
                        let (x1, y1) = flip(Vec2::new(left, y), height);
                        let (x2, _) = flip(Vec2::new(right, y), height);
                        ctx.draw(&CanvasLine::new(x1, y1, x2, y1, color));
                    }
                    y += step;
                }
            }
        }
        DrawCommand::Text {
            text,
            position,
            style,
        } => {
            let half_width = text.chars().count() as f32 * cell_width / 2.0;
            let (x, y) = flip(*position - Vec2::new(half_width, 0.0), height);
            let mut text_style = Style::default().fg(style.color);
            if style.size == TextSize::Large {
                text_style = text_style.add_modifier(Modifier::BOLD);
            }
            ctx.print(x, y, Line::styled(text.clone(), text_style));
        }
    }
}

/// Horizontal extent of a convex polygon at height `y`.
fn scanline(points: &[Vec2; 4], y: f32) -> Option<(f32, f32)> {
    let mut span: Option<(f32, f32)> = None;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let crosses = (a.y <= y && y <= b.y) || (b.y <= y && y <= a.y);
        if !crosses {
            continue;
        }
        let xs = if a.y == b.y {
            [a.x, b.x]
        } else {
            let x = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
            [x, x]
        };
        for x in xs {
            span = Some(match span {
                Some((left, right)) => (left.min(x), right.max(x)),
                None => (x, x),
            });
        }
    }
    span
}
