//! Pingu's Kitchen - A cozy order-matching arcade game
//!
//! Core modules:
//! - `catalog`: Static ingredient/recipe data, validated at startup
//! - `sim`: Deterministic simulation (orders, bowl, scoring, levels, effects)
//! - `ui`: Presentation view-models (HUD, level banner, end screen)
//! - `renderer`: Scene building and render sinks
//! - `audio`: Cue mapping and audio sinks
//! - `app`: Per-frame driver tying input, simulation and sinks together

pub mod app;
pub mod audio;
pub mod autoplay;
pub mod catalog;
pub mod error;
pub mod input;
pub mod layout;
pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, Flow};
pub use catalog::Catalog;
pub use error::{CatalogError, SettingsError, StartupError};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Design-space screen size (everything is laid out at 1280x780)
    pub const SCREEN_W: f32 = 1280.0;
    pub const SCREEN_H: f32 = 780.0;

    /// Nominal frame step (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest dt fed to a single tick (prevents runaway after stalls)
    pub const MAX_DT: f32 = 0.05;

    /// Maximum simultaneous orders on the rail
    pub const MAX_ORDERS: usize = 4;
    /// Expired orders allowed before the run ends
    pub const MAX_FAILS: u32 = 5;
    /// Bowl capacity
    pub const MAX_BOWL: usize = 6;
    /// Highest level (and unlock tier)
    pub const MAX_LEVEL: u8 = 5;

    /// Seconds the combo badge stays visible after a serve
    pub const COMBO_DISPLAY_SECS: f32 = 2.2;
    /// Level-complete interstitial length
    pub const LEVEL_COMPLETE_SECS: f32 = 3.5;

    /// Spawn cooldown at the start of a run / after a level transition
    pub const FIRST_SPAWN_SECS: f32 = 2.5;
    pub const LEVEL_SPAWN_SECS: f32 = 1.5;
    /// Orders placed on the rail when a level begins
    pub const OPENING_ORDERS: usize = 2;

    /// Per-level speed increase (order timers shrink by this factor)
    pub const SPEED_STEP: f32 = 0.18;

    /// Cap on particles emitted by a single burst
    pub const MAX_EMIT: usize = 14;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Quadratic ease-out on [0, 1]
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-out on [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
