//! Player actions: adding ingredients, serving, undo

use glam::Vec2;

use super::effects::Burst;
use super::events::{CueKind, GameEvent, Mood};
use super::order::OrderState;
use super::state::GameState;
use crate::consts::{COMBO_DISPLAY_SECS, MAX_BOWL, MAX_EMIT};
use crate::layout::{self, BOWL_CENTER};
use crate::palette;

/// Result of a serve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// Empty bowl, or not currently playing
    Ignored,
    /// Matched the order at `index` in the queue
    Served { index: usize, points: u64 },
    /// Bowl matched nothing
    Wrong,
}

/// Points for serving a recipe worth `stars` with `ratio` of its time left,
/// while `combo` serves are already chained.
pub fn serve_points(stars: u32, ratio: f32, combo: u32) -> u64 {
    // In f64: 3 * 20 * (0.5 + 0.55) must floor to 63
    let mut points = stars as f64 * 20.0 * (0.5 + ratio.clamp(0.0, 1.0) as f64);
    if combo >= 2 {
        points *= 1.0 + combo as f64 * 0.25;
    }
    points.floor() as u64
}

impl GameState {
    /// Drop an ingredient into the bowl. Returns whether it was accepted.
    pub fn add_ingredient(&mut self, id: &str) -> bool {
        if !self.is_playing() || self.bowl.len() >= MAX_BOWL {
            return false;
        }
        let Some(ingredient) = self.catalog.ingredient(id) else {
            return false;
        };
        if ingredient.unlock > self.level {
            return false;
        }

        self.bowl.push(ingredient.id);
        self.cue(CueKind::Pop);
        if let Some(slot) = self.catalog.slot_of(ingredient.id) {
            let from = layout::ingredient_button(slot).center();
            self.effects.drop(ingredient.id, from, BOWL_CENTER);
        }
        self.effects
            .emit(BOWL_CENTER, ingredient.color, 5, Burst::Scatter);
        true
    }

    /// Serve the bowl to the earliest pending order it matches exactly
    pub fn try_serve(&mut self) -> ServeOutcome {
        if !self.is_playing() || self.bowl.is_empty() {
            return ServeOutcome::Ignored;
        }

        let matched = self
            .orders
            .iter()
            .position(|o| o.is_pending() && o.matches(&self.bowl));

        let Some(index) = matched else {
            self.combo = 0;
            self.bowl.clear();
            self.cue(CueKind::Wrong);
            self.push_event(GameEvent::Mascot(Mood::Sad));
            self.effects.emit(BOWL_CENTER, palette::RED, 8, Burst::Scatter);
            self.effects
                .float_text("WRONG!", BOWL_CENTER, palette::RED, false);
            return ServeOutcome::Wrong;
        };

        let order = &mut self.orders[index];
        order.state = OrderState::Done;
        let stars = order.recipe.stars;
        let points = serve_points(stars, order.ratio(), self.combo);

        self.score += points;
        self.stars_earned += stars;
        self.combo += 1;
        self.combo_timer = COMBO_DISPLAY_SECS;
        self.bowl.clear();

        let color = palette::COMBO_COLORS[self.combo as usize % palette::COMBO_COLORS.len()];
        self.effects.emit(BOWL_CENTER, color, MAX_EMIT, Burst::Rise);
        self.effects.float_text(
            format!("+{points}"),
            BOWL_CENTER - Vec2::Y * 50.0,
            palette::GOLD,
            true,
        );
        if self.combo > 1 {
            self.effects.float_text(
                format!("x{} COMBO!", self.combo),
                BOWL_CENTER - Vec2::Y * 90.0,
                color,
                true,
            );
            self.cue(CueKind::Combo);
        } else {
            self.cue(CueKind::Ok);
        }
        self.push_event(GameEvent::Mascot(Mood::Happy));

        if self.level_score() >= self.level_spec().target {
            self.complete_level();
        }
        ServeOutcome::Served { index, points }
    }

    /// Take the last ingredient back out of the bowl
    pub fn undo_ingredient(&mut self) -> bool {
        if !self.is_playing() || self.bowl.pop().is_none() {
            return false;
        }
        self.cue(CueKind::Click);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RECIPES};
    use crate::sim::order::OrderCard;
    use crate::sim::state::GamePhase;

    fn poke_state() -> GameState {
        let mut s = GameState::new(11, Catalog::standard().unwrap());
        s.orders.clear();
        s.orders.push(OrderCard::new(&RECIPES[0], s.speed()));
        s.take_events();
        s
    }

    fn fill(s: &mut GameState, items: &[&str]) {
        for item in items {
            assert!(s.add_ingredient(item));
        }
    }

    #[test]
    fn test_points_formula() {
        assert_eq!(serve_points(1, 1.0, 0), 30);
        assert_eq!(serve_points(1, 0.0, 0), 10);
        assert_eq!(serve_points(2, 0.5, 1), 40);
        // Multiplier applies from a chain of two
        assert_eq!(serve_points(1, 1.0, 2), 45);
        assert_eq!(serve_points(3, 0.5, 4), 120);
    }

    #[test]
    fn test_points_do_not_lose_a_point_to_rounding() {
        assert_eq!(serve_points(3, 0.55, 0), 63);
        for stars in 1..=3u32 {
            for pct in 0..=100u32 {
                let ratio = pct as f32 / 100.0;
                let exact = (stars as f64 * 20.0 * (0.5 + ratio as f64)).floor() as u64;
                assert_eq!(serve_points(stars, ratio, 0), exact, "stars {stars}, ratio {pct}%");
            }
        }
    }

    #[test]
    fn test_serve_poke_bowl() {
        let mut s = poke_state();
        fill(&mut s, &["salmon", "rice", "avocado"]);
        let outcome = s.try_serve();
        assert_eq!(outcome, ServeOutcome::Served { index: 0, points: 30 });
        assert_eq!(s.orders[0].state, OrderState::Done);
        assert_eq!(s.score, 30);
        assert_eq!(s.stars_earned, 1);
        assert_eq!(s.combo, 1);
        assert!(s.bowl.is_empty());
        assert!(s.take_events().contains(&GameEvent::Cue(CueKind::Ok)));
    }

    #[test]
    fn test_earliest_matching_order_wins() {
        let mut s = poke_state();
        s.orders.push(OrderCard::new(&RECIPES[0], s.speed()));
        s.orders[0].remaining = s.orders[0].total_time / 2.0;
        fill(&mut s, &["salmon", "rice", "avocado"]);
        assert_eq!(s.try_serve(), ServeOutcome::Served { index: 0, points: 20 });
        assert_eq!(s.orders[0].state, OrderState::Done);
        assert_eq!(s.orders[1].state, OrderState::Pending);
    }

    #[test]
    fn test_done_order_is_skipped() {
        let mut s = poke_state();
        s.orders.push(OrderCard::new(&RECIPES[0], s.speed()));
        s.orders[0].state = OrderState::Done;
        fill(&mut s, &["salmon", "rice", "avocado"]);
        assert!(matches!(s.try_serve(), ServeOutcome::Served { index: 1, .. }));
    }

    #[test]
    fn test_wrong_serve() {
        let mut s = poke_state();
        s.combo = 3;
        s.score = 12;
        fill(&mut s, &["rice", "salmon", "avocado"]);
        assert_eq!(s.try_serve(), ServeOutcome::Wrong);
        assert_eq!(s.combo, 0);
        assert_eq!(s.score, 12);
        assert_eq!(s.failed_count, 0);
        assert!(s.bowl.is_empty());
        assert!(s.take_events().contains(&GameEvent::Cue(CueKind::Wrong)));
    }

    #[test]
    fn test_empty_serve_is_ignored() {
        let mut s = poke_state();
        s.combo = 2;
        assert_eq!(s.try_serve(), ServeOutcome::Ignored);
        assert_eq!(s.combo, 2);
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_combo_cue_and_multiplier() {
        let mut s = poke_state();
        s.combo = 2;
        fill(&mut s, &["salmon", "rice", "avocado"]);
        assert_eq!(s.try_serve(), ServeOutcome::Served { index: 0, points: 45 });
        assert_eq!(s.combo, 3);
        assert!(s.combo_visible());
        assert!(s.take_events().contains(&GameEvent::Cue(CueKind::Combo)));
    }

    #[test]
    fn test_ingredient_gating() {
        let mut s = poke_state();
        // Locked until level 5
        assert!(!s.add_ingredient("krill"));
        assert!(!s.add_ingredient("caviar-deluxe"));
        for _ in 0..MAX_BOWL {
            assert!(s.add_ingredient("rice"));
        }
        assert!(!s.add_ingredient("rice"));
        assert_eq!(s.bowl.len(), MAX_BOWL);

        let pops = s
            .take_events()
            .iter()
            .filter(|e| **e == GameEvent::Cue(CueKind::Pop))
            .count();
        assert_eq!(pops, MAX_BOWL);
        assert_eq!(s.effects.drops.len(), MAX_BOWL);
    }

    #[test]
    fn test_input_ignored_outside_play() {
        let mut s = poke_state();
        s.phase = GamePhase::LevelComplete { remaining: 1.0 };
        assert!(!s.add_ingredient("rice"));
        s.phase = GamePhase::GameOver { win: false };
        assert!(!s.add_ingredient("rice"));
        assert!(s.bowl.is_empty());
    }

    #[test]
    fn test_undo() {
        let mut s = poke_state();
        assert!(!s.undo_ingredient());
        assert!(s.take_events().is_empty());

        fill(&mut s, &["salmon", "rice"]);
        s.take_events();
        assert!(s.undo_ingredient());
        assert_eq!(s.bowl, vec!["salmon"]);
        assert_eq!(s.take_events(), vec![GameEvent::Cue(CueKind::Click)]);
    }

    #[test]
    fn test_reaching_target_completes_level() {
        let mut s = poke_state();
        s.score = 60;
        s.level_score_start = 0;
        fill(&mut s, &["salmon", "rice", "avocado"]);
        s.try_serve();
        assert_eq!(s.score, 90);
        assert!(matches!(s.phase, GamePhase::LevelComplete { .. }));
        let events = s.take_events();
        assert!(events.contains(&GameEvent::Cue(CueKind::LevelUp)));
        assert!(events.contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_target_on_last_level_wins() {
        let mut s = poke_state();
        s.level = 5;
        s.score = 1000;
        s.level_score_start = 260;
        fill(&mut s, &["salmon", "rice", "avocado"]);
        s.try_serve();
        assert_eq!(s.phase, GamePhase::GameOver { win: true });
    }
}
