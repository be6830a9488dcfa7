//! Presentation view-models
//!
//! Derived from the game state each frame (or kept alongside it, for the
//! purely cosmetic pieces). Nothing here feeds back into the simulation.

pub mod end_screen;
pub mod hud;
pub mod level_banner;
pub mod mascot;

pub use end_screen::{EndScreen, Floatie, SymbolKind, grade};
pub use hud::{Hud, group_thousands};
pub use level_banner::{LevelBanner, NextLevel};
pub use mascot::Mascot;
