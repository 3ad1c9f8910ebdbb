use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::entities::GameState;
use crate::renderer::Viewport;

/// Keys the simulation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    SwitchWeapon,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Key::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Key::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Key::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Key::Right),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::SwitchWeapon),
            _ => None,
        }
    }

    /// Edge keys act once per physical press.
    fn is_edge_triggered(&self) -> bool {
        matches!(self, Key::SwitchWeapon)
    }
}

/// Current key and pointer state, in playfield coordinates.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    keys_down: HashSet<Key>,
    pointer: Vec2,
    pointer_down: bool,
}

impl InputSnapshot {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn press(&mut self, key: Key) {
        self.keys_down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.keys_down.clear();
        self.pointer_down = false;
    }

    pub fn set_pointer_position(&mut self, position: Vec2) {
        self.pointer = position;
    }

    pub fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }
}

/// Lifecycle actions the host handles outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Start,
    Restart,
    Quit,
}

/// Without release events a key counts as held while presses keep coming.
/// The first auto-repeat arrives late, later ones arrive quickly.
const FIRST_REPEAT_TIMEOUT: Duration = Duration::from_millis(550);
const REPEAT_TIMEOUT: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    last_seen: Instant,
    repeating: bool,
}

impl HeldKey {
    fn expired(&self, now: Instant) -> bool {
        let timeout = if self.repeating {
            REPEAT_TIMEOUT
        } else {
            FIRST_REPEAT_TIMEOUT
        };
        now.duration_since(self.last_seen) > timeout
    }
}

/// Turns terminal events into an [`InputSnapshot`] plus lifecycle actions
pub struct InputManager {
    snapshot: InputSnapshot,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal reports key releases
    release_events: bool,
    held: HashMap<Key, HeldKey>,
    viewport: Option<Viewport>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            snapshot: InputSnapshot::default(),
            oneshot_actions: Vec::new(),
            release_events,
            held: HashMap::new(),
            viewport: None,
        }
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut InputSnapshot {
        &mut self.snapshot
    }

    /// Canvas placement of the last frame, used to map mouse cells.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// Drains pending terminal events. Call once per frame before reading actions.
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, game_state, Instant::now());
        }

        if !self.release_events {
            self.expire_held_keys(Instant::now());
        }

        Ok(())
    }

    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    pub fn handle_event(&mut self, event: Event, game_state: GameState, now: Instant) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, game_state, now),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::FocusLost => {
                self.snapshot.release_all();
                self.held.clear();
            }
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, game_state, now)
            }
            KeyEventKind::Release => {
                if let Some(key) = Key::from_code(key_event.code) {
                    self.snapshot.release(key);
                    self.held.remove(&key);
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        let is_repeat = key_event.kind == KeyEventKind::Repeat;

        if matches!(key_event.code, KeyCode::Esc)
            || (key_event.code == KeyCode::Char('c')
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::NotStarted => {
                if !is_repeat && matches!(key_event.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.oneshot_actions.push(InputAction::Start);
                }
                return;
            }
            GameState::Over => {
                if !is_repeat && matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R'))
                {
                    self.oneshot_actions.push(InputAction::Restart);
                    return;
                }
            }
            GameState::Playing => {}
        }

        let Some(key) = Key::from_code(key_event.code) else {
            return;
        };

        // Without release events a press for a key still held is auto-repeat
        let repeat = is_repeat
            || (!self.release_events
                && self.held.get(&key).is_some_and(|held| !held.expired(now)));

        if repeat {
            if let Some(held) = self.held.get_mut(&key) {
                held.last_seen = now;
                held.repeating = true;
            }
            if key.is_edge_triggered() {
                return;
            }
        } else {
            self.held.insert(
                key,
                HeldKey {
                    last_seen: now,
                    repeating: false,
                },
            );
        }

        self.snapshot.press(key);
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if let Some(viewport) = &self.viewport {
            self.snapshot
                .set_pointer_position(viewport.to_playfield(mouse_event.column, mouse_event.row));
        }

        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.snapshot.set_pointer_down(true),
            MouseEventKind::Up(MouseButton::Left) => self.snapshot.set_pointer_down(false),
            _ => {}
        }
    }

    /// Releases synthesised holds whose presses stopped arriving.
    pub fn expire_held_keys(&mut self, now: Instant) {
        let expired: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, held)| held.expired(now))
            .map(|(key, _)| *key)
            .collect();

        for key in expired {
            self.held.remove(&key);
            self.snapshot.release(key);
        }
    }
}
