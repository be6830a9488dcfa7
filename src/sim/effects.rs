//! Transient visual feedback: particles, floating text, drop animations
//!
//! Purely cosmetic. Effects draw from their own RNG stream so that emitting
//! (or disabling) them never changes gameplay.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::catalog::IngredientId;
use crate::consts::MAX_EMIT;
use crate::palette::Rgb;
use crate::{ease_out_quad, lerp, lerp_vec};

/// Downward pull on particles (px/s²)
const PARTICLE_GRAVITY: f32 = 125.0;
/// Initial rise speed of floating text (px/s)
const FLOAT_RISE: f32 = 68.0;
/// Floating text velocity damping per 1/60 s
const FLOAT_DAMPING: f32 = 0.90;
const FLOAT_DECAY: f32 = 0.8;
/// Flight time of an ingredient into the bowl
const DROP_SECS: f32 = 0.36;
/// Peak height of the drop arc
const DROP_ARC: f32 = 60.0;

/// Default pool size
pub const MAX_PARTICLES: usize = 256;

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub life: f32, // 1 -> 0
    pub decay: f32,
    pub radius: f32,
    /// Drawn as a little star instead of a dot
    pub star: bool,
}

/// Rising, fading label ("+40", "WRONG!", ...)
#[derive(Debug, Clone)]
pub struct FloatText {
    pub text: String,
    pub pos: Vec2,
    pub vel_y: f32,
    pub color: Rgb,
    pub large: bool,
    pub life: f32,
}

/// Ingredient icon flying from its button into the bowl
#[derive(Debug, Clone)]
pub struct DropAnim {
    pub ingredient: IngredientId,
    pub from: Vec2,
    pub to: Vec2,
    pub life: f32, // 1 -> 0 over DROP_SECS
}

impl DropAnim {
    /// Flight progress (0 -> 1)
    pub fn progress(&self) -> f32 {
        (1.0 - self.life).clamp(0.0, 1.0)
    }

    /// Current position: ease-out glide with an upward arc
    pub fn pos(&self) -> Vec2 {
        let t = self.progress();
        let eased = ease_out_quad(t);
        lerp_vec(self.from, self.to, eased) - Vec2::Y * (t * std::f32::consts::PI).sin() * DROP_ARC
    }

    /// Tilt in degrees (settles to upright)
    pub fn angle(&self) -> f32 {
        lerp(20.0, 0.0, ease_out_quad(self.progress()))
    }

    /// Scale (starts slightly enlarged)
    pub fn scale(&self) -> f32 {
        lerp(1.3, 1.0, ease_out_quad(self.progress()))
    }
}

/// Shape of a particle burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Burst {
    /// Random direction
    #[default]
    Scatter,
    /// Fountain upward
    Rise,
}

/// All live effects
#[derive(Debug, Clone)]
pub struct Effects {
    /// Oldest first
    pub particles: VecDeque<Particle>,
    pub floats: Vec<FloatText>,
    pub drops: Vec<DropAnim>,
    /// Pool cap (0 disables particles)
    pub max_particles: usize,
    rng: Pcg32,
}

impl Effects {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            particles: VecDeque::new(),
            floats: Vec::new(),
            drops: Vec::new(),
            max_particles: MAX_PARTICLES,
            rng,
        }
    }

    /// Spawn up to `count` particles (capped at MAX_EMIT per burst)
    pub fn emit(&mut self, origin: Vec2, color: Rgb, count: usize, burst: Burst) {
        if self.max_particles == 0 {
            return;
        }
        for i in 0..count.min(MAX_EMIT) {
            if self.particles.len() >= self.max_particles {
                self.particles.pop_front();
            }
            let jitter = Vec2::new(
                self.rng.random_range(-16.0..16.0),
                self.rng.random_range(-8.0..8.0),
            );
            let speed = self.rng.random_range(80.0..160.0);
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let vel_y = match burst {
                Burst::Rise => self.rng.random_range(-140.0..-60.0),
                Burst::Scatter => angle.sin() * speed,
            };
            self.particles.push_back(Particle {
                pos: origin + jitter,
                vel: Vec2::new(angle.cos() * speed, vel_y),
                color,
                life: 1.0,
                decay: self.rng.random_range(0.75..1.35),
                radius: self.rng.random_range(3..=8) as f32,
                star: i % 3 == 0,
            });
        }
    }

    /// Add a floating label
    pub fn float_text(&mut self, text: impl Into<String>, pos: Vec2, color: Rgb, large: bool) {
        self.floats.push(FloatText {
            text: text.into(),
            pos,
            vel_y: -FLOAT_RISE,
            color,
            large,
            life: 1.0,
        });
    }

    /// Animate an ingredient flying into the bowl
    pub fn drop(&mut self, ingredient: IngredientId, from: Vec2, to: Vec2) {
        self.drops.push(DropAnim {
            ingredient,
            from,
            to,
            life: 1.0,
        });
    }

    /// Advance everything and discard what has faded out
    pub fn tick(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel * dt;
            p.vel.y += PARTICLE_GRAVITY * dt;
            p.life -= p.decay * dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        let damping = FLOAT_DAMPING.powf(dt * 60.0);
        for f in self.floats.iter_mut() {
            f.pos.y += f.vel_y * dt;
            f.vel_y *= damping;
            f.life -= FLOAT_DECAY * dt;
        }
        self.floats.retain(|f| f.life > 0.0);

        for d in self.drops.iter_mut() {
            d.life -= dt / DROP_SECS;
        }
        self.drops.retain(|d| d.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.floats.clear();
        self.drops.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.floats.is_empty() && self.drops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{GOLD, RED};
    use rand::SeedableRng;

    fn effects() -> Effects {
        Effects::new(Pcg32::seed_from_u64(7))
    }

    #[test]
    fn test_emit_is_capped_per_burst() {
        let mut fx = effects();
        fx.emit(Vec2::ZERO, RED, 100, Burst::Scatter);
        assert_eq!(fx.particles.len(), MAX_EMIT);
    }

    #[test]
    fn test_pool_evicts_oldest() {
        let mut fx = effects();
        fx.max_particles = 20;
        fx.emit(Vec2::ZERO, RED, 14, Burst::Scatter);
        fx.emit(Vec2::new(500.0, 500.0), GOLD, 14, Burst::Scatter);
        assert_eq!(fx.particles.len(), 20);
        // Newest burst survives intact
        assert_eq!(fx.particles.iter().filter(|p| p.color == GOLD).count(), 14);
        assert!(fx.particles.iter().take(6).all(|p| p.color == RED));
        assert!(fx.particles.iter().skip(6).all(|p| p.color == GOLD));
    }

    #[test]
    fn test_full_pool_keeps_evicting() {
        let mut fx = effects();
        fx.max_particles = 64;
        for _ in 0..200 {
            fx.emit(Vec2::ZERO, RED, 14, Burst::Scatter);
        }
        fx.emit(Vec2::ZERO, GOLD, 14, Burst::Rise);
        assert_eq!(fx.particles.len(), 64);
        assert!(fx.particles.iter().rev().take(14).all(|p| p.color == GOLD));
        assert_eq!(fx.particles.front().map(|p| p.color), Some(RED));
    }

    #[test]
    fn test_disabled_pool_emits_nothing() {
        let mut fx = effects();
        fx.max_particles = 0;
        fx.emit(Vec2::ZERO, RED, 5, Burst::Rise);
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_rise_burst_moves_up() {
        let mut fx = effects();
        fx.emit(Vec2::ZERO, RED, 10, Burst::Rise);
        assert!(fx.particles.iter().all(|p| p.vel.y < 0.0));
    }

    #[test]
    fn test_everything_fades_out() {
        let mut fx = effects();
        fx.emit(Vec2::ZERO, RED, 14, Burst::Scatter);
        fx.float_text("+40", Vec2::ZERO, GOLD, true);
        fx.drop("rice", Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert!(!fx.is_empty());

        fx.tick(0.2);
        assert_eq!(fx.floats.len(), 1);
        assert_eq!(fx.drops.len(), 1);

        // Slowest decay is 0.75/s for particles, 0.8/s for text
        for _ in 0..100 {
            fx.tick(1.0 / 60.0);
        }
        assert!(fx.is_empty());
    }

    #[test]
    fn test_float_text_rises() {
        let mut fx = effects();
        fx.float_text("WRONG!", Vec2::new(0.0, 100.0), RED, false);
        fx.tick(0.1);
        assert!(fx.floats[0].pos.y < 100.0);
        assert!(fx.floats[0].vel_y > -FLOAT_RISE);
    }

    #[test]
    fn test_drop_path_endpoints() {
        let mut fx = effects();
        let to = Vec2::new(620.0, 640.0);
        fx.drop("salmon", Vec2::new(100.0, 100.0), to);
        assert_eq!(fx.drops[0].pos(), Vec2::new(100.0, 100.0));
        fx.drops[0].life = 0.0;
        assert!((fx.drops[0].pos() - to).length() < 1e-3);
        assert!((fx.drops[0].scale() - 1.0).abs() < 1e-6);
    }
}
