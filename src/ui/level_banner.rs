//! Between-level interstitial card

use crate::consts::{LEVEL_COMPLETE_SECS, MAX_LEVEL};
use crate::sim::{GamePhase, GameState, level_spec};

/// Preview of the level that comes next
#[derive(Debug, Clone, PartialEq)]
pub struct NextLevel {
    pub level: u8,
    pub label: &'static str,
    pub target: u64,
}

/// Contents of the level-complete card
#[derive(Debug, Clone, PartialEq)]
pub struct LevelBanner {
    pub level: u8,
    pub label: &'static str,
    pub level_score: u64,
    pub target: u64,
    /// Countdown bar (1 -> 0)
    pub ratio: f32,
    /// Seconds since the card appeared
    pub shown_for: f32,
    pub next: Option<NextLevel>,
}

impl LevelBanner {
    /// The banner, if the interstitial is showing
    pub fn from_state(state: &GameState) -> Option<Self> {
        let GamePhase::LevelComplete { remaining } = state.phase else {
            return None;
        };
        let spec = state.level_spec();
        let next = (state.level < MAX_LEVEL).then(|| {
            let level = state.level + 1;
            let spec = level_spec(level);
            NextLevel {
                level,
                label: spec.label,
                target: spec.target,
            }
        });
        Some(Self {
            level: state.level,
            label: spec.label,
            level_score: state.level_score(),
            target: spec.target,
            ratio: (remaining / LEVEL_COMPLETE_SECS).clamp(0.0, 1.0),
            shown_for: (LEVEL_COMPLETE_SECS - remaining).max(0.0),
            next,
        })
    }

    /// Fade-in of the dim overlay and card
    pub fn ease(&self) -> f32 {
        (self.shown_for * 3.0).min(1.0)
    }

    pub fn title(&self) -> String {
        format!("LEVEL {} CLEAR!", self.level)
    }

    pub fn score_line(&self) -> String {
        format!(
            "Score this level: {}  /  target {}",
            self.level_score, self.target
        )
    }

    pub fn next_line(&self) -> Option<String> {
        self.next.as_ref().map(|n| {
            format!(
                "Next: Level {} - {}  (target: {} pts)",
                n.level, n.label, n.target
            )
        })
    }
}
