//! HUD panel contents

use crate::consts::MAX_FAILS;
use crate::palette::{self, Rgb};
use crate::sim::GameState;

/// What the HUD panel shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub stars: u32,
    pub level: u8,
    pub level_color: Rgb,
    pub level_label: &'static str,
    /// Fail pips, filled first (`■■□□□`)
    pub fails: String,
    /// Three or more fails turn the pips red
    pub fails_warning: bool,
    /// `(combo, color)` while the combo badge is up
    pub combo: Option<(u32, Rgb)>,
    pub level_score: u64,
    pub target: u64,
    /// Level goal progress (0..=1)
    pub goal_ratio: f32,
    /// Whole seconds left on the level clock
    pub seconds_left: u32,
    /// Level clock remaining (0..=1)
    pub time_ratio: f32,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let spec = state.level_spec();
        let level_score = state.level_score();
        let failed = state.failed_count.min(MAX_FAILS) as usize;
        let fails = "■".repeat(failed) + &"□".repeat(MAX_FAILS as usize - failed);
        let combo = state.combo_visible().then(|| {
            let colors = [palette::GOLD, palette::PINK, palette::CYAN, palette::LIME];
            (state.combo, colors[state.combo as usize % colors.len()])
        });
        let time_left = state.time_left();

        Self {
            score: state.score,
            stars: state.stars_earned,
            level: state.level,
            level_color: palette::LEVEL_COLORS[(state.level.max(1) - 1) as usize % 5],
            level_label: spec.label,
            fails,
            fails_warning: state.failed_count >= 3,
            combo,
            level_score,
            target: spec.target,
            goal_ratio: (level_score as f32 / spec.target.max(1) as f32).min(1.0),
            seconds_left: time_left as u32,
            time_ratio: (time_left / spec.duration).clamp(0.0, 1.0),
        }
    }

    /// Score with thousands separators
    pub fn score_text(&self) -> String {
        group_thousands(self.score)
    }
}

/// `12345` -> `"12,345"`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_fresh_hud() {
        let state = GameState::new(1, Catalog::standard().unwrap());
        let hud = Hud::from_state(&state);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.fails, "□□□□□");
        assert!(!hud.fails_warning);
        assert_eq!(hud.combo, None);
        assert_eq!(hud.target, 80);
        assert_eq!(hud.seconds_left, 60);
        assert_eq!(hud.time_ratio, 1.0);
        assert_eq!(hud.level_label, "Apprentice Chef");
    }

    #[test]
    fn test_fails_and_combo() {
        let mut state = GameState::new(1, Catalog::standard().unwrap());
        state.failed_count = 3;
        state.combo = 2;
        state.combo_timer = 1.0;
        state.score = 40;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.fails, "■■■□□");
        assert!(hud.fails_warning);
        assert_eq!(hud.combo, Some((2, palette::CYAN)));
        assert_eq!(hud.goal_ratio, 0.5);

        // Badge hides once the timer runs out
        state.combo_timer = 0.0;
        assert_eq!(Hud::from_state(&state).combo, None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
