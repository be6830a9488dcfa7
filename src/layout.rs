//! Screen layout and hit-testing
//!
//! Everything is placed in a fixed 1280x780 design space. The window is
//! letterboxed onto it by [`Viewport`].

use glam::Vec2;

use crate::catalog::{Catalog, IngredientId};
use crate::consts::{MAX_ORDERS, SCREEN_H, SCREEN_W};

pub const TOP_BAR_H: f32 = 50.0;

/// Ingredient panel (left)
pub const PANEL_X: f32 = 8.0;
pub const PANEL_W: f32 = 200.0;
pub const BUTTON_TOP: f32 = TOP_BAR_H + 50.0;
pub const BUTTON_PITCH: f32 = 47.0;
pub const BUTTON_H: f32 = 44.0;

/// HUD panel (right)
pub const HUD_W: f32 = 240.0;
pub const HUD_H: f32 = 210.0;
pub const HUD_MARGIN: f32 = 10.0;

/// Order rail (top)
pub const ORDER_Y: f32 = TOP_BAR_H + 26.0;
pub const CARD_W: f32 = 190.0;
pub const CARD_H: f32 = 155.0;
/// How far a card slides in from above
pub const CARD_SLIDE: f32 = 85.0;

/// Mixing bowl
pub const BOWL_CENTER: Vec2 = Vec2::new(620.0, 640.0);
pub const BOWL_W: f32 = 310.0;
pub const BOWL_H: f32 = 130.0;

/// Axis-aligned rectangle in design space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Button for the ingredient in panel slot `slot`
pub fn ingredient_button(slot: usize) -> Rect {
    Rect::new(
        PANEL_X + 8.0,
        BUTTON_TOP + slot as f32 * BUTTON_PITCH,
        PANEL_W - 16.0,
        BUTTON_H,
    )
}

pub fn serve_button() -> Rect {
    Rect::new(BOWL_CENTER.x - 95.0, BOWL_CENTER.y + 88.0, 190.0, 46.0)
}

/// Small "undo last ingredient" button left of SERVE
pub fn undo_button() -> Rect {
    Rect::new(BOWL_CENTER.x - 153.0, BOWL_CENTER.y + 88.0, 50.0, 46.0)
}

pub fn bowl_rect() -> Rect {
    Rect::new(
        BOWL_CENTER.x - BOWL_W / 2.0,
        BOWL_CENTER.y - BOWL_H / 2.0,
        BOWL_W,
        BOWL_H,
    )
}

pub fn hud_rect() -> Rect {
    Rect::new(SCREEN_W - HUD_W - HUD_MARGIN, TOP_BAR_H + 4.0, HUD_W, HUD_H)
}

/// Top-left corner of order card `index` when `count` cards are on the rail
///
/// Cards are spread evenly between the ingredient panel and the HUD.
pub fn order_slot(index: usize, count: usize) -> Vec2 {
    let count = count.clamp(1, MAX_ORDERS);
    let area_left = PANEL_X + PANEL_W + 8.0;
    let area_w = hud_rect().x - area_left - 8.0;
    let gap = ((area_w - count as f32 * CARD_W) / (count as f32 + 1.0)).max(8.0);
    Vec2::new(area_left + gap + index as f32 * (CARD_W + gap), ORDER_Y)
}

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Ingredient(IngredientId),
    Serve,
    Undo,
}

/// Resolve a design-space point to a control
///
/// Locked ingredients are still reported; gating is the simulation's job.
pub fn hit_test(catalog: &Catalog, p: Vec2) -> Option<Hit> {
    if let Some(ingredient) = catalog
        .ingredients()
        .iter()
        .enumerate()
        .find(|(slot, _)| ingredient_button(*slot).contains(p))
        .map(|(_, ingredient)| ingredient)
    {
        return Some(Hit::Ingredient(ingredient.id));
    }
    if serve_button().contains(p) {
        Some(Hit::Serve)
    } else if undo_button().contains(p) {
        Some(Hit::Undo)
    } else {
        None
    }
}

/// Maps window pixels onto the letterboxed design space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Uniform scale from design space to window pixels
    pub fn scale(&self) -> f32 {
        (self.width / SCREEN_W).min(self.height / SCREEN_H)
    }

    /// Window-space offset of the design-space origin
    pub fn offset(&self) -> Vec2 {
        let s = self.scale();
        Vec2::new(
            (self.width - SCREEN_W * s) / 2.0,
            (self.height - SCREEN_H * s) / 2.0,
        )
    }

    /// Convert a window-space point to design space
    pub fn to_design(&self, x: f32, y: f32) -> Vec2 {
        (Vec2::new(x, y) - self.offset()) / self.scale()
    }

    /// Convert a design-space point to window space
    pub fn to_window(&self, p: Vec2) -> Vec2 {
        self.offset() + p * self.scale()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(SCREEN_W, SCREEN_H)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_fit_on_screen() {
        let catalog = Catalog::standard().unwrap();
        let last = ingredient_button(catalog.ingredients().len() - 1);
        assert!(last.y + last.h <= SCREEN_H);
        assert!(serve_button().y + serve_button().h <= SCREEN_H);
    }

    #[test]
    fn test_hit_test_controls() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(
            hit_test(&catalog, ingredient_button(0).center()),
            Some(Hit::Ingredient("salmon"))
        );
        assert_eq!(
            hit_test(&catalog, ingredient_button(13).center()),
            Some(Hit::Ingredient("krill"))
        );
        assert_eq!(hit_test(&catalog, serve_button().center()), Some(Hit::Serve));
        assert_eq!(hit_test(&catalog, undo_button().center()), Some(Hit::Undo));
        assert_eq!(hit_test(&catalog, Vec2::new(640.0, 10.0)), None);
    }

    #[test]
    fn test_order_slots_do_not_overlap_panels() {
        for count in 1..=MAX_ORDERS {
            let first = order_slot(0, count);
            let last = order_slot(count - 1, count);
            assert!(first.x >= PANEL_X + PANEL_W);
            assert!(last.x + CARD_W <= hud_rect().x);
        }
    }

    #[test]
    fn test_viewport_letterbox_round_trip() {
        // Twice as wide: bars on the left and right
        let vp = Viewport::new(SCREEN_W * 2.0 + 400.0, SCREEN_H * 2.0);
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.offset(), Vec2::new(200.0, 0.0));
        let p = vp.to_design(200.0 + 2.0 * 620.0, 2.0 * 640.0);
        assert!((p - BOWL_CENTER).length() < 1e-3);
        let w = vp.to_window(BOWL_CENTER);
        assert!((vp.to_design(w.x, w.y) - BOWL_CENTER).length() < 1e-3);
    }
}
