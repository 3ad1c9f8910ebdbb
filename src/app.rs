use color_eyre::Result;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::surface::DrawList;
use crate::world::World;

/// Target time per frame (~60 FPS)
const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    world: World,
    /// Last frame's draw calls, replayed by the renderer
    draw_list: DrawList,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, release_events: bool) -> Self {
        Self {
            running: true,
            world: World::new(config),
            draw_list: DrawList::new(),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Mouse cells are mapped through the canvas as it will be drawn
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            self.input_manager
                .set_viewport(self.renderer.viewport(area, self.world.config().playfield));

            self.input_manager.poll_events(self.world.state())?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);

            // One tick: update runs to completion before draw
            self.world
                .tick(self.input_manager.snapshot_mut(), &mut self.draw_list);

            terminal.draw(|frame| {
                let view = self.render_view(frame.area());
                self.renderer.render(frame, &view);
            })?;

            // Sleep out the rest of the frame to prevent CPU spinning
            if let Some(rest) = FRAME_BUDGET.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Ok(())
    }

    fn render_view(&self, area: Rect) -> RenderView<'_> {
        let player = self.world.player();
        RenderView {
            game_state: self.world.state(),
            draw_list: &self.draw_list,
            playfield: self.world.config().playfield,
            level: self.world.level(),
            enemies_alive: self.world.alive_enemies(),
            health: player.body.health,
            weapon_name: player.weapon().get_name(),
            fps: self.fps,
            area,
        }
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    log::info!("quit requested");
                    self.running = false;
                }
                InputAction::Start => {
                    self.world.start();
                }
                InputAction::Restart => {
                    self.world.restart();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GameState;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(
            GameConfig {
                seed: Some(99),
                ..GameConfig::default()
            },
            true,
        )
    }

    #[test]
    fn test_start_and_quit_actions() {
        let mut app = app();
        app.process_actions(&[InputAction::Restart]);
        assert_eq!(app.world.state(), GameState::NotStarted);

        app.process_actions(&[InputAction::Start]);
        assert_eq!(app.world.state(), GameState::Playing);

        app.process_actions(&[InputAction::Quit]);
        assert!(!app.running);
    }

    #[test]
    fn test_frame_renders_on_test_backend() {
        let mut app = app();
        app.world.start();
        app.world
            .tick(app.input_manager.snapshot_mut(), &mut app.draw_list);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let view = app.render_view(frame.area());
                app.renderer.render(frame, &view);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let hud: String = (0..80u16)
            .map(|x| buffer[(x, 0u16)].symbol().to_string())
            .collect();
        assert!(hud.contains("Level: 1"));
        assert!(hud.contains("Weapon: Machete"));
    }
}
