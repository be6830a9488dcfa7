//! Game state and core simulation types
//!
//! Everything a run needs to be reproduced from its seed lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::{Burst, Effects, MAX_PARTICLES};
use super::events::{CueKind, GameEvent, Mood};
use super::order::OrderCard;
use crate::catalog::{Catalog, IngredientId};
use crate::consts::*;
use crate::layout::BOWL_CENTER;
use crate::palette;

/// Salt separating the cosmetic RNG stream from the gameplay one
const FX_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    /// Orders are running
    Playing,
    /// Between-level interstitial
    LevelComplete { remaining: f32 },
    /// Run ended
    GameOver { win: bool },
}

/// One row of the level table
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSpec {
    /// Level length (seconds)
    pub duration: f32,
    /// Points needed within this level
    pub target: u64,
    pub label: &'static str,
}

pub static LEVELS: [LevelSpec; MAX_LEVEL as usize] = [
    LevelSpec {
        duration: 60.0,
        target: 80,
        label: "Apprentice Chef",
    },
    LevelSpec {
        duration: 70.0,
        target: 180,
        label: "Sous Chef",
    },
    LevelSpec {
        duration: 75.0,
        target: 320,
        label: "Head Chef",
    },
    LevelSpec {
        duration: 80.0,
        target: 500,
        label: "Master Chef",
    },
    LevelSpec {
        duration: 90.0,
        target: 750,
        label: "Legendary Pingu",
    },
];

/// Table row for `level` (clamped into 1..=5)
pub fn level_spec(level: u8) -> &'static LevelSpec {
    &LEVELS[(level.clamp(1, MAX_LEVEL) - 1) as usize]
}

/// Order timer speed multiplier at `level`
pub fn speed_for(level: u8) -> f32 {
    1.0 + (level.max(1) - 1) as f32 * SPEED_STEP
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub catalog: Catalog,
    pub phase: GamePhase,
    /// Current level (1..=5)
    pub level: u8,
    pub score: u64,
    pub stars_earned: u32,
    /// Expired orders this level (0..=5)
    pub failed_count: u32,
    pub combo: u32,
    /// Combo badge display countdown
    pub combo_timer: f32,
    /// Score when the current level began
    pub level_score_start: u64,
    /// Seconds played in the current level
    pub elapsed: f32,
    /// Orders in queue order (max 4)
    pub orders: Vec<OrderCard>,
    /// Ingredients placed so far (max 6)
    pub bowl: Vec<IngredientId>,
    pub spawn_cooldown: f32,
    /// Visual effects (not gameplay-affecting)
    pub effects: Effects,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, catalog: Catalog) -> Self {
        Self::with_particle_cap(seed, catalog, MAX_PARTICLES)
    }

    /// Create a new run whose particle pool holds at most `max_particles`
    pub fn with_particle_cap(seed: u64, catalog: Catalog, max_particles: usize) -> Self {
        let mut effects = Effects::new(Pcg32::seed_from_u64(seed ^ FX_STREAM_SALT));
        effects.max_particles = max_particles;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            catalog,
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            stars_earned: 0,
            failed_count: 0,
            combo: 0,
            combo_timer: 0.0,
            level_score_start: 0,
            elapsed: 0.0,
            orders: Vec::with_capacity(MAX_ORDERS),
            bowl: Vec::with_capacity(MAX_BOWL),
            spawn_cooldown: FIRST_SPAWN_SECS,
            effects,
            events: Vec::new(),
        };

        for _ in 0..OPENING_ORDERS {
            state.spawn_order();
        }
        state.events.push(GameEvent::LevelStarted { level: 1 });
        state
    }

    /// Start over at level 1 with a fresh seed, keeping catalog and particle cap
    pub fn reset(&mut self, seed: u64) {
        *self = Self::with_particle_cap(seed, self.catalog.clone(), self.effects.max_particles);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Order timer speed multiplier for the current level
    pub fn speed(&self) -> f32 {
        speed_for(self.level)
    }

    pub fn level_spec(&self) -> &'static LevelSpec {
        level_spec(self.level)
    }

    /// Points scored since the current level began
    pub fn level_score(&self) -> u64 {
        self.score.saturating_sub(self.level_score_start)
    }

    /// Seconds left on the level clock
    pub fn time_left(&self) -> f32 {
        (self.level_spec().duration - self.elapsed).max(0.0)
    }

    /// Whether the combo badge should be shown
    pub fn combo_visible(&self) -> bool {
        self.combo >= 2 && self.combo_timer > 0.0
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn cue(&mut self, cue: CueKind) {
        self.events.push(GameEvent::Cue(cue));
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Append a random order if the queue has room. Returns whether one was added.
    pub fn spawn_order(&mut self) -> bool {
        if self.orders.len() >= MAX_ORDERS {
            return false;
        }
        let available = self.catalog.recipes_available(self.level);
        if available.is_empty() {
            return false;
        }
        let recipe = available[self.rng.random_range(0..available.len())];
        log::debug!("Order: {} (level {})", recipe.name, self.level);
        self.orders.push(OrderCard::new(recipe, self.speed()));
        true
    }

    /// React to the level target being met (interstitial, or a win on the last level)
    pub(crate) fn complete_level(&mut self) {
        if self.level < MAX_LEVEL {
            log::info!(
                "Level {} clear: score {} ({} this level)",
                self.level,
                self.score,
                self.level_score()
            );
            self.phase = GamePhase::LevelComplete {
                remaining: LEVEL_COMPLETE_SECS,
            };
            self.cue(CueKind::LevelUp);
            self.push_event(GameEvent::Mascot(Mood::Happy));
            self.push_event(GameEvent::LevelCleared { level: self.level });
            self.effects.float_text(
                format!("LEVEL {} CLEAR!", self.level),
                BOWL_CENTER - Vec2::Y * 130.0,
                palette::LIME,
                true,
            );
            self.effects
                .emit(BOWL_CENTER, palette::LIME, MAX_EMIT, Burst::Rise);
        } else {
            self.end_game(true);
        }
    }

    /// Leave the interstitial and start the next level
    pub(crate) fn advance_level(&mut self) {
        self.level = (self.level + 1).min(MAX_LEVEL);
        self.level_score_start = self.score;
        self.elapsed = 0.0;
        self.failed_count = 0;
        self.orders.clear();
        self.bowl.clear();
        self.phase = GamePhase::Playing;
        for _ in 0..OPENING_ORDERS {
            self.spawn_order();
        }
        self.spawn_cooldown = LEVEL_SPAWN_SECS;
        log::info!("Level {} start: {}", self.level, self.level_spec().label);
        self.push_event(GameEvent::LevelStarted { level: self.level });
    }

    pub(crate) fn end_game(&mut self, win: bool) {
        log::info!(
            "Game over ({}): score {}, stars {}, level {}",
            if win { "win" } else { "lose" },
            self.score,
            self.stars_earned,
            self.level
        );
        self.phase = GamePhase::GameOver { win };
        self.push_event(GameEvent::Mascot(if win { Mood::Happy } else { Mood::Sad }));
        self.push_event(GameEvent::GameOver {
            win,
            score: self.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(seed: u64) -> GameState {
        GameState::new(seed, Catalog::standard().unwrap())
    }

    #[test]
    fn test_new_game_defaults() {
        let mut s = state(1);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.level, 1);
        assert_eq!(s.score, 0);
        assert_eq!(s.orders.len(), OPENING_ORDERS);
        assert!(s.bowl.is_empty());
        assert_eq!(s.spawn_cooldown, FIRST_SPAWN_SECS);
        assert_eq!(s.take_events(), vec![GameEvent::LevelStarted { level: 1 }]);
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_speed_per_level() {
        assert_eq!(speed_for(1), 1.0);
        assert!((speed_for(5) - 1.72).abs() < 1e-6);
    }

    #[test]
    fn test_level_table() {
        assert_eq!(level_spec(1).target, 80);
        assert_eq!(level_spec(5).duration, 90.0);
        assert_eq!(level_spec(5).label, "Legendary Pingu");
        // Out-of-range levels clamp
        assert_eq!(level_spec(0), level_spec(1));
        assert_eq!(level_spec(9), level_spec(5));
    }

    #[test]
    fn test_spawn_respects_capacity_and_level() {
        let mut s = state(3);
        while s.spawn_order() {}
        assert_eq!(s.orders.len(), MAX_ORDERS);
        assert!(!s.spawn_order());
        for order in &s.orders {
            assert_eq!(order.recipe.unlock, 1);
            assert!(order.recipe.ingredients.iter().all(|i| s.catalog.is_unlocked(i, 1)));
        }
    }

    #[test]
    fn test_advance_level_resets_level_state() {
        let mut s = state(4);
        s.score = 95;
        s.failed_count = 3;
        s.elapsed = 42.0;
        s.bowl.push("rice");
        s.complete_level();
        assert_eq!(s.phase, GamePhase::LevelComplete { remaining: LEVEL_COMPLETE_SECS });

        s.advance_level();
        assert_eq!(s.level, 2);
        assert_eq!(s.level_score_start, 95);
        assert_eq!(s.level_score(), 0);
        assert_eq!(s.elapsed, 0.0);
        assert_eq!(s.failed_count, 0);
        assert!(s.bowl.is_empty());
        assert_eq!(s.orders.len(), OPENING_ORDERS);
        assert_eq!(s.spawn_cooldown, LEVEL_SPAWN_SECS);
        assert!(s.is_playing());
    }

    #[test]
    fn test_completing_last_level_wins() {
        let mut s = state(5);
        s.level = MAX_LEVEL;
        s.complete_level();
        assert_eq!(s.phase, GamePhase::GameOver { win: true });
    }

    #[test]
    fn test_reset_keeps_particle_cap() {
        let mut s = GameState::with_particle_cap(6, Catalog::standard().unwrap(), 40);
        s.score = 500;
        s.level = 3;
        s.end_game(false);
        s.reset(7);
        assert_eq!(s.seed, 7);
        assert_eq!(s.level, 1);
        assert_eq!(s.score, 0);
        assert!(s.is_playing());
        assert_eq!(s.effects.max_particles, 40);
    }
}
