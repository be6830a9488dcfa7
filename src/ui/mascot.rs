//! Pingu, the kitchen mascot
//!
//! Purely presentational: reacts to [`Mood`] events with a short happy dance
//! or a sad droop, and idles with a gentle bob.

use crate::sim::Mood;

const HAPPY_SECS: f32 = 1.6;
const SAD_SECS: f32 = 1.4;
const HOP_VELOCITY: f32 = -9.0;
const SPRING: f32 = 580.0;
const DAMPING: f32 = 18.0;
const BLINK_PERIOD: f32 = 3.5;
const BLINK_SECS: f32 = 0.12;

#[derive(Debug, Clone, Default)]
pub struct Mascot {
    /// Running animation clock
    pub t: f32,
    pub happy: f32,
    pub sad: f32,
    /// Spring displacement (negative is up)
    pub bounce: f32,
    bounce_vel: f32,
}

impl Mascot {
    pub fn react(&mut self, mood: Mood) {
        match mood {
            Mood::Happy => {
                self.happy = HAPPY_SECS;
                self.bounce_vel = HOP_VELOCITY;
            }
            Mood::Sad => self.sad = SAD_SECS,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.t += dt;
        self.happy = (self.happy - dt).max(0.0);
        self.sad = (self.sad - dt).max(0.0);
        self.bounce_vel += (-self.bounce * SPRING - self.bounce_vel * DAMPING) * dt;
        self.bounce += self.bounce_vel * dt;
    }

    pub fn is_happy(&self) -> bool {
        self.happy > 0.0
    }

    pub fn is_sad(&self) -> bool {
        self.sad > 0.0 && !self.is_happy()
    }

    /// Vertical offset in px (idle bob plus hop)
    pub fn offset_y(&self) -> f32 {
        (self.t * 1.8).sin() * 4.0 + self.bounce * 22.0
    }

    /// Horizontal wiggle while dancing
    pub fn offset_x(&self) -> f32 {
        if self.is_happy() {
            (self.t * 5.0).sin() * 9.0
        } else {
            0.0
        }
    }

    /// Wing flap angle (radians)
    pub fn wing(&self) -> f32 {
        let amplitude = if self.is_happy() { 20.0 } else { 5.0 };
        ((self.t * 3.2).sin() * amplitude).to_radians()
    }

    /// Eyes shut for the last BLINK_SECS of every blink period
    pub fn is_blinking(&self) -> bool {
        self.t % BLINK_PERIOD > BLINK_PERIOD - BLINK_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_hop_settles() {
        let mut m = Mascot::default();
        m.react(Mood::Happy);
        m.update(1.0 / 60.0);
        assert!(m.is_happy());
        assert!(m.bounce < 0.0);
        for _ in 0..300 {
            m.update(1.0 / 60.0);
        }
        assert!(!m.is_happy());
        assert!(m.bounce.abs() < 0.01);
    }

    #[test]
    fn test_happy_overrides_sad() {
        let mut m = Mascot::default();
        m.react(Mood::Sad);
        assert!(m.is_sad());
        m.react(Mood::Happy);
        assert!(!m.is_sad());
        assert!(m.offset_x().abs() <= 9.0);
    }

    #[test]
    fn test_blinks_briefly() {
        let mut m = Mascot::default();
        assert!(!m.is_blinking());
        m.t = 3.45;
        assert!(m.is_blinking());
        m.t = 3.6;
        assert!(!m.is_blinking());
    }
}
