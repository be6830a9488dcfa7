//! Demo player
//!
//! Plays through the same input path as a person: it produces window-space
//! clicks on the on-screen buttons, paced like a quick human, with the odd
//! fumble. Used by the headless native runner.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::catalog::IngredientId;
use crate::consts::MAX_BOWL;
use crate::input::{InputEvent, InputSource};
use crate::layout::{self, Viewport};
use crate::sim::{GameState, OrderCard};

/// Seconds between clicks (jittered +-30%)
const CLICK_INTERVAL: f32 = 0.32;
/// Chance a click lands on a random ingredient instead
const MISTAKE_CHANCE: f64 = 0.04;

/// What the bot decided to press this time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Ingredient(IngredientId),
    Serve,
    Undo,
}

#[derive(Debug, Clone)]
pub struct Autoplay {
    rng: Pcg32,
    viewport: Viewport,
    cooldown: f32,
    pub click_interval: f32,
    pub mistake_chance: f64,
    /// Quit this long after the run ends (None: wait forever)
    pub quit_after: Option<f32>,
    over_for: f32,
}

impl Autoplay {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            cooldown: CLICK_INTERVAL,
            click_interval: CLICK_INTERVAL,
            mistake_chance: MISTAKE_CHANCE,
            quit_after: Some(2.0),
            over_for: 0.0,
        }
    }

    /// Never fumble (deterministic best play)
    pub fn flawless(mut self) -> Self {
        self.mistake_chance = 0.0;
        self
    }

    /// The order to work on: the most urgent pending one the bowl can still become
    fn target<'a>(state: &'a GameState) -> Option<&'a OrderCard> {
        state
            .orders
            .iter()
            .filter(|o| o.is_pending() && o.recipe.ingredients.starts_with(&state.bowl))
            .min_by(|a, b| a.remaining.total_cmp(&b.remaining))
    }

    /// Best move for `state`, ignoring fumbles
    pub fn plan(state: &GameState) -> Option<Intent> {
        let Some(order) = Self::target(state) else {
            return (!state.bowl.is_empty()).then_some(Intent::Undo);
        };
        let recipe = order.recipe.ingredients;
        if recipe.len() == state.bowl.len() {
            Some(Intent::Serve)
        } else if state.bowl.len() >= MAX_BOWL {
            Some(Intent::Undo)
        } else {
            Some(Intent::Ingredient(recipe[state.bowl.len()]))
        }
    }

    fn fumble(&mut self, state: &GameState) -> Option<Intent> {
        let unlocked: Vec<IngredientId> = state.catalog.unlocked_at(state.level).into_iter().collect();
        if unlocked.is_empty() {
            return None;
        }
        let pick = unlocked[self.rng.random_range(0..unlocked.len())];
        Some(Intent::Ingredient(pick))
    }

    fn click_at(&self, state: &GameState, intent: Intent) -> Option<InputEvent> {
        let design: Vec2 = match intent {
            Intent::Ingredient(id) => layout::ingredient_button(state.catalog.slot_of(id)?).center(),
            Intent::Serve => layout::serve_button().center(),
            Intent::Undo => layout::undo_button().center(),
        };
        let p = self.viewport.to_window(design);
        Some(InputEvent::Click { x: p.x, y: p.y })
    }
}

impl InputSource for Autoplay {
    fn poll(&mut self, state: &GameState, dt: f32) -> Vec<InputEvent> {
        if state.is_over() {
            self.over_for += dt;
            return match self.quit_after {
                Some(after) if self.over_for >= after => vec![InputEvent::Quit],
                _ => Vec::new(),
            };
        }
        self.over_for = 0.0;
        if !state.is_playing() {
            return Vec::new();
        }

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return Vec::new();
        }
        self.cooldown = self.click_interval * self.rng.random_range(0.7..1.3);

        let intent = if self.mistake_chance > 0.0 && self.rng.random_bool(self.mistake_chance) {
            self.fumble(state)
        } else {
            Self::plan(state)
        };
        intent
            .and_then(|intent| self.click_at(state, intent))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RECIPES};
    use crate::layout::hit_test;
    use crate::sim::GamePhase;

    fn state_with_poke() -> GameState {
        let mut state = GameState::new(5, Catalog::standard().unwrap());
        state.orders = vec![OrderCard::new(&RECIPES[0], 1.0)];
        state
    }

    #[test]
    fn test_plan_builds_then_serves() {
        let mut state = state_with_poke();
        assert_eq!(Autoplay::plan(&state), Some(Intent::Ingredient("salmon")));
        state.bowl = vec!["salmon", "rice"];
        assert_eq!(Autoplay::plan(&state), Some(Intent::Ingredient("avocado")));
        state.bowl.push("avocado");
        assert_eq!(Autoplay::plan(&state), Some(Intent::Serve));
    }

    #[test]
    fn test_plan_undoes_dead_ends() {
        let mut state = state_with_poke();
        state.bowl = vec!["rice"];
        assert_eq!(Autoplay::plan(&state), Some(Intent::Undo));
        state.bowl.clear();
        state.orders.clear();
        assert_eq!(Autoplay::plan(&state), None);
    }

    #[test]
    fn test_clicks_land_on_buttons() {
        let vp = Viewport::new(1920.0, 1080.0);
        let state = state_with_poke();
        let mut bot = Autoplay::new(1, vp).flawless();
        let mut clicks = Vec::new();
        for _ in 0..120 {
            clicks.extend(bot.poll(&state, 1.0 / 60.0));
        }
        assert!(!clicks.is_empty());
        for click in clicks {
            let InputEvent::Click { x, y } = click else {
                panic!("unexpected {click:?}");
            };
            let hit = hit_test(&state.catalog, vp.to_design(x, y));
            assert_eq!(hit, Some(layout::Hit::Ingredient("salmon")));
        }
    }

    #[test]
    fn test_quits_after_game_over() {
        let mut state = state_with_poke();
        state.phase = GamePhase::GameOver { win: false };
        let mut bot = Autoplay::new(1, Viewport::default());
        assert!(bot.poll(&state, 1.0).is_empty());
        assert_eq!(bot.poll(&state, 1.0), vec![InputEvent::Quit]);
    }
}
