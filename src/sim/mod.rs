//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable `dt` in, no wall-clock reads
//! - Seeded RNG only (gameplay and effects on separate streams)
//! - Stable iteration order (queue order for orders, insertion order for the bowl)
//! - No rendering, audio or platform dependencies

pub mod actions;
pub mod effects;
pub mod events;
pub mod order;
pub mod state;
pub mod tick;

pub use actions::{ServeOutcome, serve_points};
pub use effects::{Burst, DropAnim, Effects, FloatText, Particle};
pub use events::{CueKind, GameEvent, Mood};
pub use order::{OrderCard, OrderState, Urgency};
pub use state::{GamePhase, GameState, LEVELS, LevelSpec, level_spec, speed_for};
pub use tick::{Command, TickInput, apply, tick};
