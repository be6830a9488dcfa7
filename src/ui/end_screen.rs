//! Win/lose overlay
//!
//! Built once when the run ends and animated until restart. Randomness here
//! is cosmetic and comes from its own seeded generator.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_H, SCREEN_W};
use crate::palette::{self, Rgb};

const WIN_HEADLINES: [&str; 5] = [
    "You're a culinary genius, little penguin!",
    "The frozen kitchen bows to your greatness!",
    "Every dish was served with love and fish!",
    "Master Chef of the Antarctic! Bow down!",
    "Your cooking made the polar bears cry happy tears!",
];

const LOSE_HEADLINES: [&str; 5] = [
    "The fish got away... but penguins never give up!",
    "Oops! Even the best chefs burn the seaweed sometimes.",
    "The kitchen timer won this round. Not next time!",
    "Your wings tried so hard. Try again, little buddy!",
    "The orders were too spicy for today. Waddle back!",
];

const WIN_SUBTITLES: [&str; 4] = [
    "All orders served fresh from the frozen shore!",
    "The customers are sliding with joy!",
    "Five levels of pure penguin perfection!",
    "Arctic Michelin Star awarded!",
];

const LOSE_SUBTITLES: [&str; 4] = [
    "The kitchen needs you back!",
    "The hungry penguins are waiting for round two.",
    "Shake off the ice and try again!",
    "Every master chef had a bad day once.",
];

const GRADES: [char; 6] = ['F', 'D', 'C', 'B', 'A', 'S'];
const GRADE_COLORS: [Rgb; 6] = [
    palette::RED,
    palette::CORAL,
    palette::ORANGE,
    palette::GOLD,
    palette::LIME,
    palette::CYAN,
];

const FLOATIE_COLORS: [Rgb; 8] = [
    palette::PINK,
    palette::CYAN,
    palette::LIME,
    palette::GOLD,
    palette::PURPLE,
    palette::TEAL,
    palette::CORAL,
    palette::OFF_WHITE,
];

pub const FLOATIE_COUNT: usize = 18;

/// Decorative symbol drifting behind the end card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Star,
    Heart,
    Snowflake,
    Fish,
    Note,
    Drop,
    Zzz,
}

impl SymbolKind {
    pub const WIN: [SymbolKind; 5] = [
        SymbolKind::Star,
        SymbolKind::Heart,
        SymbolKind::Snowflake,
        SymbolKind::Fish,
        SymbolKind::Note,
    ];
    pub const LOSE: [SymbolKind; 5] = [
        SymbolKind::Snowflake,
        SymbolKind::Fish,
        SymbolKind::Note,
        SymbolKind::Drop,
        SymbolKind::Zzz,
    ];

    /// Spokes drawn for radial symbols
    pub fn spokes(&self) -> Option<u32> {
        match self {
            SymbolKind::Star => Some(5),
            SymbolKind::Snowflake => Some(6),
            _ => None,
        }
    }
}

/// A floating decoration
#[derive(Debug, Clone, PartialEq)]
pub struct Floatie {
    pub kind: SymbolKind,
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
    /// Upward drift (px/s)
    pub speed: f32,
    /// Sway phase offset
    pub phase: f32,
    /// Rotation (degrees)
    pub rotation: f32,
    pub spin: f32,
    pub alpha: f32,
}

/// Letter grade for a run's stars
pub fn grade(stars: u32) -> (char, Rgb) {
    let idx = (stars / 4).min(5) as usize;
    (GRADES[idx], GRADE_COLORS[idx])
}

/// End-of-run overlay state
#[derive(Debug, Clone)]
pub struct EndScreen {
    pub win: bool,
    pub score: u64,
    pub stars: u32,
    pub level: u8,
    pub grade: char,
    pub grade_color: Rgb,
    pub headline: &'static str,
    pub subtitle: &'static str,
    pub floaties: Vec<Floatie>,
    /// Seconds since the overlay appeared
    pub t: f32,
    rng: Pcg32,
}

impl EndScreen {
    pub fn new(win: bool, score: u64, stars: u32, level: u8, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (headlines, subtitles, symbols): (&[&'static str], &[&'static str], &[SymbolKind]) =
            if win {
                (&WIN_HEADLINES, &WIN_SUBTITLES, &SymbolKind::WIN)
            } else {
                (&LOSE_HEADLINES, &LOSE_SUBTITLES, &SymbolKind::LOSE)
            };
        let headline = headlines.choose(&mut rng).copied().unwrap_or_default();
        let subtitle = subtitles.choose(&mut rng).copied().unwrap_or_default();

        let floaties = (0..FLOATIE_COUNT)
            .map(|_| Floatie {
                kind: symbols
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(SymbolKind::Snowflake),
                x: rng.random_range(40.0..SCREEN_W - 40.0),
                y: rng.random_range(SCREEN_H * 0.05..SCREEN_H * 0.92),
                color: FLOATIE_COLORS
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(palette::OFF_WHITE),
                size: rng.random_range(12..=26) as f32,
                speed: rng.random_range(18.0..50.0),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
                rotation: rng.random_range(0.0..360.0),
                spin: rng.random_range(-40.0..40.0),
                alpha: rng.random_range(140..=230) as f32 / 255.0,
            })
            .collect();

        let (grade, grade_color) = grade(stars);
        log::info!("End screen: grade {grade} ({stars} stars)");

        Self {
            win,
            score,
            stars,
            level,
            grade,
            grade_color,
            headline,
            subtitle,
            floaties,
            t: 0.0,
            rng,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.t += dt;
        for f in self.floaties.iter_mut() {
            f.y -= f.speed * dt;
            f.rotation += f.spin * dt;
            f.x += (self.t * 0.8 + f.phase).sin() * 18.0 * dt;
            if f.y < -40.0 {
                f.y = SCREEN_H + 20.0;
                f.x = self.rng.random_range(40.0..SCREEN_W - 40.0);
            }
        }
    }

    /// Fade-in (0 -> 1)
    pub fn ease(&self) -> f32 {
        (self.t * 2.8).min(1.0)
    }

    pub fn title(&self) -> &'static str {
        if self.win { "YOU WIN!" } else { "GAME OVER" }
    }

    /// Accent used for the card border and glow
    pub fn accent(&self) -> Rgb {
        if self.win { palette::LIME } else { palette::CORAL }
    }

    pub fn restart_hint(&self) -> &'static str {
        if self.win {
            "Press R to help Pingu waddle again!"
        } else {
            "Press R to try again!"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grades() {
        assert_eq!(grade(0).0, 'F');
        assert_eq!(grade(3).0, 'F');
        assert_eq!(grade(4).0, 'D');
        assert_eq!(grade(12).0, 'B');
        assert_eq!(grade(20).0, 'S');
        assert_eq!(grade(400), ('S', palette::CYAN));
    }

    #[test]
    fn test_messages_match_outcome() {
        let win = EndScreen::new(true, 900, 30, 5, 1);
        assert!(WIN_HEADLINES.contains(&win.headline));
        assert!(WIN_SUBTITLES.contains(&win.subtitle));
        assert_eq!(win.title(), "YOU WIN!");

        let lose = EndScreen::new(false, 10, 1, 1, 1);
        assert!(LOSE_HEADLINES.contains(&lose.headline));
        assert!(lose.floaties.iter().all(|f| SymbolKind::LOSE.contains(&f.kind)));
    }

    #[test]
    fn test_floaties_drift_and_wrap() {
        let mut screen = EndScreen::new(true, 0, 0, 1, 9);
        assert_eq!(screen.floaties.len(), FLOATIE_COUNT);
        assert_eq!(screen.ease(), 0.0);
        for _ in 0..(60 * 60) {
            screen.update(1.0 / 60.0);
        }
        assert_eq!(screen.ease(), 1.0);
        assert!(
            screen
                .floaties
                .iter()
                .all(|f| f.y >= -40.0 && f.y <= SCREEN_H + 20.0)
        );
    }

    #[test]
    fn test_same_seed_same_screen() {
        let a = EndScreen::new(false, 5, 2, 1, 42);
        let b = EndScreen::new(false, 5, 2, 1, 42);
        assert_eq!(a.headline, b.headline);
        assert_eq!(a.floaties, b.floaties);
    }
}
