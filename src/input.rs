//! Discrete player input
//!
//! Front ends translate their native events into [`InputEvent`]s (window
//! pixels for clicks) and hand the app one batch per frame.

use crate::sim::GameState;

/// One input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary-button press at window coordinates
    Click { x: f32, y: f32 },
    /// Start over from level 1
    Restart,
    /// Leave the game
    Quit,
}

/// Map a DOM-style key name to an event
pub fn key_event(key: &str) -> Option<InputEvent> {
    match key {
        "r" | "R" => Some(InputEvent::Restart),
        "Escape" | "q" | "Q" => Some(InputEvent::Quit),
        _ => None,
    }
}

/// True if the batch asks to quit (checked before anything else is applied)
pub fn wants_quit(events: &[InputEvent]) -> bool {
    events.iter().any(|e| matches!(e, InputEvent::Quit))
}

/// Anything that produces input batches (a live device, a script, a bot)
pub trait InputSource {
    /// Events for the coming frame. `state` is read-only.
    fn poll(&mut self, state: &GameState, dt: f32) -> Vec<InputEvent>;
}

/// Replays a fixed schedule of batches, one per frame, then goes quiet
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState, _dt: f32) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}
