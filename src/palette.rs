//! Colors shared by the simulation (effect tints) and the renderer

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend toward `other` by `t` (clamped to [0, 1])
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).clamp(0.0, 255.0) as u8
        };
        Rgb(ch(self.0, other.0), ch(self.1, other.1), ch(self.2, other.2))
    }

    /// Attach an alpha channel (0-1)
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            rgb: self,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn opaque(self) -> Rgba {
        self.with_alpha(1.0)
    }
}

/// RGB with floating alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    /// CSS color string (`rgba(r,g,b,a)`)
    pub fn css(&self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.rgb.0, self.rgb.1, self.rgb.2, self.a
        )
    }
}

pub const BG0: Rgb = Rgb(8, 14, 40);
pub const BG1: Rgb = Rgb(14, 22, 58);
pub const GLASS: Rgb = Rgb(22, 34, 85);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const OFF_WHITE: Rgb = Rgb(215, 230, 255);
pub const PINK: Rgb = Rgb(255, 60, 175);
pub const CYAN: Rgb = Rgb(0, 210, 255);
pub const LIME: Rgb = Rgb(55, 255, 115);
pub const GOLD: Rgb = Rgb(255, 210, 30);
pub const CORAL: Rgb = Rgb(255, 90, 70);
pub const PURPLE: Rgb = Rgb(170, 55, 255);
pub const TEAL: Rgb = Rgb(30, 215, 185);
pub const ORANGE: Rgb = Rgb(255, 148, 20);
pub const GREEN: Rgb = Rgb(48, 215, 105);
pub const RED: Rgb = Rgb(255, 55, 55);
pub const INK: Rgb = Rgb(10, 10, 30);

/// Rotating tint for serve bursts, indexed by combo
pub const COMBO_COLORS: [Rgb; 5] = [GOLD, LIME, CYAN, PINK, PURPLE];

/// Badge color per level (1-based level maps to index level-1)
pub const LEVEL_COLORS: [Rgb; 5] = [CYAN, LIME, GOLD, PINK, PURPLE];
