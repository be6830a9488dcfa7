//! Order cards: one customer request with a countdown

use crate::catalog::{IngredientId, Recipe};

/// Slide-in speed (progress per second)
pub const SLIDE_IN_RATE: f32 = 5.0;
/// How long a served card stays on the rail
pub const DONE_LINGER: f32 = 1.5;
/// Linger countdown speed
pub const LINGER_RATE: f32 = 1.2;

/// Lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Pending,
    Done,
    Failed,
}

/// Timer color band (presentation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    Warning,
    Urgent,
}

/// An active order on the rail
#[derive(Debug, Clone)]
pub struct OrderCard {
    pub recipe: &'static Recipe,
    /// Full countdown at the speed the order was spawned with
    pub total_time: f32,
    pub remaining: f32,
    pub state: OrderState,
    /// Slide-in animation (0 -> 1)
    pub slide: f32,
    /// Counts down after the order is served
    pub linger: f32,
}

impl OrderCard {
    pub fn new(recipe: &'static Recipe, speed: f32) -> Self {
        let total_time = recipe.base_time / speed.max(f32::EPSILON);
        Self {
            recipe,
            total_time,
            remaining: total_time,
            state: OrderState::Pending,
            slide: 0.0,
            linger: DONE_LINGER,
        }
    }

    /// Advance by `dt`. Returns true exactly once: on the tick the order expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.slide = (self.slide + dt * SLIDE_IN_RATE).min(1.0);
        match self.state {
            OrderState::Done => {
                self.linger = (self.linger - dt * LINGER_RATE).max(0.0);
                false
            }
            OrderState::Failed => false,
            OrderState::Pending => {
                self.remaining = (self.remaining - dt).max(0.0);
                if self.remaining <= 0.0 {
                    self.state = OrderState::Failed;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == OrderState::Pending
    }

    /// Whether a bowl exactly matches this order (same items, same order)
    pub fn matches(&self, bowl: &[IngredientId]) -> bool {
        self.recipe.ingredients == bowl
    }

    /// Served, slid in and finished lingering
    pub fn is_finished(&self) -> bool {
        self.state == OrderState::Done && self.slide >= 1.0 && self.linger <= 0.0
    }

    /// Fraction of time left, clamped to [0, 1]
    pub fn ratio(&self) -> f32 {
        if self.total_time <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.total_time).clamp(0.0, 1.0)
    }

    pub fn urgency(&self) -> Urgency {
        let ratio = self.ratio();
        if ratio > 0.5 {
            Urgency::Calm
        } else if ratio > 0.25 {
            Urgency::Warning
        } else {
            Urgency::Urgent
        }
    }

    /// Whole seconds shown on the card's timer
    pub fn seconds_left(&self) -> u32 {
        self.remaining as u32 + 1
    }
}
