/// Top-level lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Waiting for the start signal; nothing updates or draws
    #[default]
    NotStarted,
    Playing,
    /// Entities are frozen until a restart
    Over,
}
