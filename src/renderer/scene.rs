//! Scene building
//!
//! Turns a read-only view of the game into a [`Frame`]. Layers are pushed
//! back to front in the same order every frame: background, top bar, orders,
//! ingredient panel, bowl, mascot, HUD, effects, hint bar, overlays.

use glam::Vec2;

use super::shapes;
use super::{Align, DrawCmd, FontSize, Frame};
use crate::catalog::Ingredient;
use crate::consts::{SCREEN_H, SCREEN_W};
use crate::layout::{self, Rect};
use crate::palette::{self, Rgb};
use crate::settings::Settings;
use crate::sim::{GameState, OrderCard, OrderState, Urgency};
use crate::ui::{EndScreen, Floatie, Hud, LevelBanner, Mascot, SymbolKind, group_thousands};
use crate::{ease_out_cubic, lerp};

const TITLE: &str = "Pingu's Cozy Kitchen";
const HINT: &str = "Click ingredients in order  →  SERVE to match  │  R=restart  ESC=quit  │  Hit score target to advance levels!";
const HINT_BAR_H: f32 = 24.0;
const STAR_COUNT: u32 = 60;

/// Kitchen mascot's resting spot
const MASCOT_HOME: Vec2 = Vec2::new(SCREEN_W - 115.0, SCREEN_H - 185.0);

const PENGUIN_DARK: Rgb = Rgb(20, 20, 52);
const PENGUIN_WING: Rgb = Rgb(16, 16, 48);
const PENGUIN_BELLY: Rgb = Rgb(242, 250, 255);
const PENGUIN_BELLY_SHADE: Rgb = Rgb(198, 218, 245);
const BEAK: Rgb = Rgb(255, 190, 40);
const FEET: Rgb = Rgb(255, 185, 30);
const HAT: Rgb = Rgb(246, 246, 252);
const MUTED: Rgb = Rgb(55, 70, 110);
const TRACK: Rgb = Rgb(14, 22, 52);

/// Presentation state kept outside the simulation
#[derive(Debug, Clone, Copy)]
pub struct SceneExtras<'a> {
    pub mascot: &'a Mascot,
    pub end_screen: Option<&'a EndScreen>,
    pub settings: &'a Settings,
}

/// Build the frame for `state` at wall-clock `time` (seconds)
pub fn build_frame(state: &GameState, extras: SceneExtras<'_>, time: f32) -> Frame {
    let mut f = Frame::new(palette::BG0);

    background(&mut f, extras.settings, time);
    top_bar(&mut f);
    orders(&mut f, state, time);
    ingredient_panel(&mut f, state);
    bowl(&mut f, state);
    penguin(
        &mut f,
        MASCOT_HOME + Vec2::new(extras.mascot.offset_x(), extras.mascot.offset_y()),
        &Pose::from_mascot(extras.mascot, palette::PINK),
    );
    hud(&mut f, &Hud::from_state(state));
    effects(&mut f, state);
    hint_bar(&mut f);

    if let Some(end) = extras.end_screen {
        end_screen(&mut f, end, extras.mascot);
    }
    if let Some(banner) = LevelBanner::from_state(state) {
        level_banner(&mut f, &banner);
    }
    f
}

/// Cheap stable hash in [0, 1) for decoration placement
fn hash01(i: u32, salt: f32) -> f32 {
    let v = ((i as f32 + 1.0) * 12.9898 + salt * 78.233).sin() * 43_758.547;
    v - v.floor()
}

fn background(f: &mut Frame, settings: &Settings, time: f32) {
    // Vertical gradient in a handful of bands
    let bands = 8;
    let band_h = SCREEN_H / bands as f32;
    for i in 0..bands {
        let color = palette::BG0.mix(palette::BG1, i as f32 / (bands - 1) as f32);
        f.fill_rect(
            Rect::new(0.0, i as f32 * band_h, SCREEN_W, band_h + 1.0),
            0.0,
            color.opaque(),
        );
    }

    for i in 0..STAR_COUNT {
        let pos = Vec2::new(hash01(i, 1.0) * SCREEN_W, hash01(i, 2.0) * SCREEN_H);
        let phase = hash01(i, 3.0) * std::f32::consts::TAU;
        let speed = 1.5 + hash01(i, 4.0) * 2.0;
        let alpha = 0.25 + 0.38 * (phase + time * speed).sin().abs();
        f.circle(pos, 0.8 + hash01(i, 5.0) * 1.4, Rgb(210, 228, 255).with_alpha(alpha));
    }

    if settings.quality.aurora_enabled() {
        let waves = [
            (0.22, SCREEN_H * 0.20, 55.0, 280.0, Rgb(0, 220, 180), 0.09),
            (0.34, SCREEN_H * 0.38, 45.0, 240.0, Rgb(80, 60, 255), 0.07),
        ];
        for (i, (speed, y, amp, width, color, alpha)) in waves.into_iter().enumerate() {
            let phase = hash01(i as u32, 6.0) * std::f32::consts::TAU + time * speed;
            f.push(DrawCmd::Polygon {
                points: shapes::aurora_band(SCREEN_W, y, amp, width, phase, 18.0),
                fill: color.with_alpha(alpha),
            });
        }
    }

    for i in 0..settings.quality.snowflakes() as u32 {
        let speed = 18.0 + hash01(i, 7.0) * 37.0;
        let drift = -12.0 + hash01(i, 8.0) * 24.0;
        let span = SCREEN_H + 20.0;
        let y = (hash01(i, 9.0) * span + speed * time) % span - 10.0;
        let x = (hash01(i, 10.0) * SCREEN_W + drift * time).rem_euclid(SCREEN_W);
        let alpha = 0.2 + hash01(i, 11.0) * 0.35;
        f.circle(
            Vec2::new(x, y),
            1.5 + hash01(i, 12.0) * 2.0,
            Rgb(200, 225, 255).with_alpha(alpha),
        );
    }
}

fn top_bar(f: &mut Frame) {
    f.fill_rect(
        Rect::new(0.0, 0.0, SCREEN_W, layout::TOP_BAR_H),
        0.0,
        palette::GLASS.with_alpha(0.76),
    );
    // Shimmer line along the bottom edge
    let segments = 32;
    let seg_w = SCREEN_W / segments as f32;
    for i in 0..segments {
        let t = (i as f32 + 0.5) / segments as f32;
        f.fill_rect(
            Rect::new(i as f32 * seg_w, layout::TOP_BAR_H - 2.0, seg_w + 1.0, 2.0),
            0.0,
            palette::CYAN
                .mix(palette::PINK, t)
                .with_alpha(0.67 * (std::f32::consts::PI * t).sin()),
        );
    }
    f.text(
        TITLE,
        Vec2::new(SCREEN_W / 2.0, layout::TOP_BAR_H / 2.0),
        FontSize::Title,
        palette::WHITE.opaque(),
    );
}

/// Procedural ingredient icon: tinted disc with a highlight and initial
pub fn ingredient_icon(f: &mut Frame, ingredient: &Ingredient, center: Vec2, radius: f32, tilt: f32) {
    f.circle(center, radius + 2.0, ingredient.color.mix(palette::INK, 0.55).opaque());
    f.circle(center, radius, ingredient.color.opaque());
    let highlight = Vec2::new(-0.35, -0.35).rotate(Vec2::from_angle(tilt.to_radians()));
    f.circle(
        center + highlight * radius,
        radius * 0.28,
        palette::WHITE.with_alpha(0.55),
    );
    let initial: String = ingredient.name.chars().take(1).collect();
    f.text(initial, center, FontSize::Tiny, palette::INK.with_alpha(0.8));
}

fn button(f: &mut Frame, rect: Rect, color: Rgb, label: &str, active: bool) {
    let (alpha, border, text) = if active {
        (0.78, color, color.mix(palette::WHITE, 0.7))
    } else {
        (0.35, Rgb(40, 50, 80), MUTED)
    };
    f.panel(rect, 12.0, palette::GLASS.with_alpha(alpha), Some(border));
    f.text(label, rect.center(), FontSize::Medium, text.opaque());
}

fn ingredient_panel(f: &mut Frame, state: &GameState) {
    let catalog = &state.catalog;
    let height = catalog.ingredients().len() as f32 * layout::BUTTON_PITCH + 60.0;
    f.panel(
        Rect::new(layout::PANEL_X, layout::TOP_BAR_H + 4.0, layout::PANEL_W, height),
        16.0,
        palette::GLASS.with_alpha(0.7),
        Some(palette::CYAN),
    );
    let cx = layout::PANEL_X + layout::PANEL_W / 2.0;
    f.text(
        "INGREDIENTS",
        Vec2::new(cx, layout::TOP_BAR_H + 18.0),
        FontSize::Small,
        palette::CYAN.opaque(),
    );
    f.text(
        format!("Level {}  -  unlock more!", state.level),
        Vec2::new(cx, layout::TOP_BAR_H + 36.0),
        FontSize::Tiny,
        Rgb(72, 120, 175).opaque(),
    );

    for (slot, ingredient) in catalog.ingredients().iter().enumerate() {
        let rect = layout::ingredient_button(slot);
        if !catalog.is_unlocked(ingredient.id, state.level) {
            f.panel(rect, 10.0, palette::GLASS.with_alpha(0.35), Some(Rgb(38, 48, 88)));
            f.text(
                "LOCKED",
                rect.center(),
                FontSize::Tiny,
                MUTED.opaque(),
            );
            continue;
        }
        f.panel(rect, 10.0, palette::GLASS.with_alpha(0.84), Some(ingredient.color));
        ingredient_icon(
            f,
            ingredient,
            Vec2::new(rect.x + 26.0, rect.center().y),
            15.0,
            0.0,
        );
        f.text_aligned(
            ingredient.name,
            Vec2::new(rect.x + 52.0, rect.center().y),
            FontSize::Small,
            Align::Left,
            ingredient.color.mix(palette::WHITE, 0.72).opaque(),
        );
    }
}

/// Border color of an order card
fn order_border(order: &OrderCard, time: f32) -> Rgb {
    match order.state {
        OrderState::Done => palette::LIME,
        OrderState::Failed => palette::RED,
        OrderState::Pending => match order.urgency() {
            Urgency::Calm => palette::CYAN.mix(palette::PINK, 1.0 - order.ratio()),
            Urgency::Warning => palette::ORANGE,
            Urgency::Urgent => palette::RED.mix(palette::GOLD, 0.5 + 0.5 * (time * 11.0).sin()),
        },
    }
}

fn orders(f: &mut Frame, state: &GameState, time: f32) {
    f.text_aligned(
        "INCOMING ORDERS",
        Vec2::new(layout::PANEL_X + layout::PANEL_W + 10.0, layout::TOP_BAR_H + 14.0),
        FontSize::Small,
        Align::Left,
        palette::GOLD.opaque(),
    );
    let count = state.orders.len();
    for (i, order) in state.orders.iter().enumerate() {
        let slot = layout::order_slot(i, count);
        let y = slot.y - (1.0 - ease_out_cubic(order.slide)) * layout::CARD_SLIDE;
        order_card(f, state, order, Vec2::new(slot.x, y), time);
    }
}

fn order_card(f: &mut Frame, state: &GameState, order: &OrderCard, origin: Vec2, time: f32) {
    let rect = Rect::new(origin.x, origin.y, layout::CARD_W, layout::CARD_H);
    let border = order_border(order, time);
    let cx = rect.x + rect.w / 2.0;

    f.fill_rect(
        Rect::new(rect.x - 6.0, rect.y - 6.0, rect.w + 12.0, rect.h + 12.0),
        22.0,
        border.with_alpha(0.12),
    );
    f.panel(rect, 16.0, palette::GLASS.with_alpha(0.76), Some(border));

    f.text(
        order.recipe.name,
        Vec2::new(cx, rect.y + 15.0),
        FontSize::Tiny,
        palette::OFF_WHITE.opaque(),
    );

    let stars = order.recipe.stars as f32;
    for s in 0..order.recipe.stars {
        f.glow_dot(
            Vec2::new(cx - stars * 10.0 + s as f32 * 20.0 + 10.0, rect.y + 32.0),
            5.0,
            palette::GOLD,
        );
    }

    let steps = order.recipe.ingredients;
    let n = steps.len().max(1) as f32;
    let spacing = ((rect.w - 16.0) / n).min(36.0);
    let start_x = cx - spacing * (n - 1.0) / 2.0;
    for (i, id) in steps.iter().enumerate() {
        let pos = Vec2::new(start_x + i as f32 * spacing, rect.y + 62.0);
        if let Some(ingredient) = state.catalog.ingredient(id) {
            ingredient_icon(f, ingredient, pos, 12.0, 0.0);
        }
        let badge = pos + Vec2::new(0.0, -19.0);
        f.circle(badge, 6.5, palette::PURPLE.with_alpha(0.75));
        f.text((i + 1).to_string(), badge, FontSize::Tiny, palette::WHITE.opaque());
    }

    // Timer ring
    let ring = Vec2::new(cx, rect.y + rect.h - 26.0);
    f.circle(ring, 24.0, Rgb(18, 28, 65).opaque());
    f.push(DrawCmd::Arc {
        center: ring,
        radius: 20.0,
        width: 5.0,
        ratio: 1.0,
        color: Rgb(28, 42, 90).opaque(),
    });
    let (label, color) = match order.state {
        OrderState::Done => ("DONE!".to_string(), palette::LIME),
        OrderState::Failed => ("GONE!".to_string(), palette::RED),
        OrderState::Pending => {
            if order.ratio() > 0.0 {
                f.push(DrawCmd::Arc {
                    center: ring,
                    radius: 20.0,
                    width: 5.0,
                    ratio: order.ratio(),
                    color: palette::RED.mix(palette::GREEN, order.ratio()).opaque(),
                });
            }
            (order.seconds_left().to_string(), palette::WHITE)
        }
    };
    f.text(label, ring, FontSize::Tiny, color.opaque());

    match order.state {
        OrderState::Done => f.fill_rect(rect, 16.0, palette::GREEN.with_alpha(0.18)),
        OrderState::Failed => f.fill_rect(rect, 16.0, palette::RED.with_alpha(0.18)),
        OrderState::Pending => {}
    }
}

fn bowl(f: &mut Frame, state: &GameState) {
    let center = layout::BOWL_CENTER;
    let rect = layout::bowl_rect();
    let accent = if state.bowl.is_empty() {
        Rgb(28, 58, 98)
    } else {
        palette::TEAL
    };

    f.push(DrawCmd::Ellipse {
        center,
        radii: Vec2::new(layout::BOWL_W / 2.0 + 15.0, layout::BOWL_H / 2.0 + 15.0),
        fill: accent.with_alpha(0.11),
    });
    f.panel(rect, 28.0, palette::GLASS.with_alpha(0.82), Some(accent));
    f.text(
        "YOUR MIXING BOWL",
        Vec2::new(center.x, rect.y + 18.0),
        FontSize::Small,
        accent.opaque(),
    );

    if state.bowl.is_empty() {
        f.text(
            "← click ingredients",
            center + Vec2::new(0.0, 10.0),
            FontSize::Tiny,
            Rgb(45, 75, 125).opaque(),
        );
    } else {
        let n = state.bowl.len() as f32;
        let spacing = ((layout::BOWL_W - 24.0) / n).min(50.0);
        let start_x = center.x - spacing * (n - 1.0) / 2.0;
        for (i, id) in state.bowl.iter().enumerate() {
            let Some(ingredient) = state.catalog.ingredient(id) else {
                continue;
            };
            let pos = Vec2::new(start_x + i as f32 * spacing, center.y + 10.0);
            f.glow_dot(pos, 18.0, ingredient.color);
            ingredient_icon(f, ingredient, pos, 14.0, 0.0);
            f.text(
                ingredient.name,
                pos + Vec2::new(0.0, 28.0),
                FontSize::Tiny,
                ingredient.color.mix(palette::WHITE, 0.65).opaque(),
            );
        }
    }

    let active = !state.bowl.is_empty();
    button(f, layout::serve_button(), palette::LIME, "SERVE ▲", active);
    button(f, layout::undo_button(), palette::CORAL, "✕", active);
}

/// Everything needed to draw one penguin
#[derive(Debug, Clone, Copy)]
pub struct Pose {
    pub t: f32,
    /// Wing rotation (radians)
    pub wing: f32,
    pub happy: bool,
    pub sad: bool,
    pub blinking: bool,
    pub hat_band: Rgb,
}

impl Pose {
    pub fn from_mascot(mascot: &Mascot, hat_band: Rgb) -> Self {
        Self {
            t: mascot.t,
            wing: mascot.wing(),
            happy: mascot.is_happy(),
            sad: mascot.is_sad(),
            blinking: mascot.is_blinking(),
            hat_band,
        }
    }
}

fn rotate_about(points: &mut [Vec2], pivot: Vec2, angle: f32) {
    let rot = Vec2::from_angle(angle);
    for p in points.iter_mut() {
        *p = pivot + rot.rotate(*p - pivot);
    }
}

/// Procedural chef penguin anchored at head-top `base`
pub fn penguin(f: &mut Frame, base: Vec2, pose: &Pose) {
    let p = |x: f32, y: f32| base + Vec2::new(x, y);

    f.push(DrawCmd::Ellipse {
        center: p(0.0, 107.0),
        radii: Vec2::new(45.0, 9.0),
        fill: Rgb(0, 0, 40).with_alpha(0.3),
    });

    // Body and belly
    f.push(DrawCmd::Ellipse {
        center: p(0.0, 56.0),
        radii: Vec2::new(31.0, 42.0),
        fill: PENGUIN_DARK.opaque(),
    });
    for i in 0..4 {
        let t = i as f32 / 3.0;
        let (w, h) = (lerp(28.0, 18.0, t), lerp(64.0, 42.0, t));
        f.push(DrawCmd::Ellipse {
            center: p(0.0, 20.0 + t * 12.0 + h / 2.0),
            radii: Vec2::new(w / 2.0, h / 2.0),
            fill: PENGUIN_BELLY.mix(PENGUIN_BELLY_SHADE, t).opaque(),
        });
    }

    // Wings flap about the shoulders
    for side in [-1.0_f32, 1.0] {
        let shoulder = p(side * 29.0, 30.0);
        let mut wing = vec![
            shoulder,
            p(side * 53.0, 46.0),
            p(side * 43.0, 80.0),
            p(side * 20.0, 72.0),
        ];
        rotate_about(&mut wing, shoulder, -side * pose.wing);
        f.push(DrawCmd::Polygon {
            points: wing,
            fill: PENGUIN_WING.opaque(),
        });
    }

    let hop = if pose.happy {
        (pose.t * 5.0).sin().abs() * 6.0
    } else {
        0.0
    };
    for (x, dy) in [(-14.0, hop), (14.0, -hop)] {
        f.push(DrawCmd::Ellipse {
            center: p(x, 102.5 + dy),
            radii: Vec2::new(11.0, 5.5),
            fill: FEET.opaque(),
        });
    }

    // Head and face
    f.circle(p(0.0, 10.0), 30.0, PENGUIN_DARK.opaque());
    f.push(DrawCmd::Ellipse {
        center: p(0.0, 17.5),
        radii: Vec2::new(17.0, 15.5),
        fill: PENGUIN_BELLY.opaque(),
    });
    let cheek = if pose.happy {
        Some(Rgb(255, 120, 160).with_alpha(0.47))
    } else if pose.sad {
        Some(Rgb(100, 100, 205).with_alpha(0.4))
    } else {
        None
    };
    if let Some(fill) = cheek {
        for x in [-17.0, 17.0] {
            f.push(DrawCmd::Ellipse {
                center: p(x, 25.5),
                radii: Vec2::new(9.0, 5.5),
                fill,
            });
        }
    }

    let eye_drop = if pose.happy { 2.0 } else { 0.0 };
    for x in [-9.0_f32, 9.0] {
        if pose.blinking {
            f.push(DrawCmd::Ellipse {
                center: p(x - 2.0 * x.signum() + 1.0, 9.0),
                radii: Vec2::new(5.0, 2.0),
                fill: PENGUIN_DARK.opaque(),
            });
        } else {
            f.circle(p(x, 10.0), 7.0, Rgb(240, 248, 255).opaque());
            f.circle(p(x + 1.0, 10.0 + eye_drop), 5.0, Rgb(25, 25, 55).opaque());
            f.circle(p(x + 3.0, 8.0 + eye_drop), 2.0, palette::WHITE.opaque());
        }
    }

    f.push(DrawCmd::Polygon {
        points: shapes::beak(p(0.0, 19.0), 7.0, 11.0),
        fill: BEAK.opaque(),
    });
    if pose.happy {
        f.push(DrawCmd::Line {
            from: p(-6.0, 24.0),
            to: p(6.0, 24.0),
            width: 2.0,
            color: Rgb(255, 80, 110).opaque(),
        });
    } else if pose.sad {
        f.push(DrawCmd::Line {
            from: p(-6.0, 30.0),
            to: p(6.0, 30.0),
            width: 2.0,
            color: Rgb(80, 80, 165).opaque(),
        });
        f.push(DrawCmd::Ellipse {
            center: p(14.0, 20.0),
            radii: Vec2::new(3.0, 5.0),
            fill: Rgb(140, 180, 255).with_alpha(0.65),
        });
    }

    // Chef hat
    f.fill_rect(Rect::new(base.x - 24.0, base.y - 21.0, 48.0, 8.0), 4.0, HAT.opaque());
    f.push(DrawCmd::Polygon {
        points: vec![p(-20.0, -21.0), p(20.0, -21.0), p(15.0, -55.0), p(-15.0, -55.0)],
        fill: HAT.opaque(),
    });
    f.push(DrawCmd::Polygon {
        points: vec![p(-19.0, -23.0), p(19.0, -23.0), p(18.0, -30.0), p(-18.0, -30.0)],
        fill: pose.hat_band.opaque(),
    });
    f.circle(p(0.0, -55.0), 8.0, HAT.opaque());

    if pose.happy {
        for (i, color) in [palette::GOLD, palette::PINK, palette::CYAN].into_iter().enumerate() {
            let a = pose.t * 4.0 + i as f32 * 2.1;
            let spark = p(a.cos() * 42.0, -22.0 + a.sin() * 20.0);
            f.circle(spark, 4.0, color.opaque());
            f.circle(spark, 2.0, palette::WHITE.opaque());
        }
    }
}

fn progress_bar(f: &mut Frame, rect: Rect, ratio: f32, fill: Rgb, border: Rgb) {
    let radius = rect.h / 2.0;
    f.fill_rect(rect, radius, TRACK.opaque());
    if ratio > 0.0 {
        f.fill_rect(
            Rect::new(rect.x, rect.y, rect.w * ratio.min(1.0), rect.h),
            radius,
            fill.opaque(),
        );
    }
    f.push(DrawCmd::Rect {
        rect,
        radius,
        fill: None,
        stroke: Some((border.with_alpha(0.4), 1.0)),
    });
}

fn hud(f: &mut Frame, hud: &Hud) {
    let r = layout::hud_rect();
    let cx = r.x + r.w / 2.0;
    f.panel(r, 16.0, palette::GLASS.with_alpha(0.74), Some(palette::PURPLE));

    f.text(
        hud.score_text(),
        Vec2::new(cx, r.y + 24.0),
        FontSize::Large,
        palette::GOLD.opaque(),
    );
    f.text("SCORE", Vec2::new(cx, r.y + 46.0), FontSize::Tiny, palette::GOLD.opaque());
    f.fill_rect(
        Rect::new(r.x + 14.0, r.y + 55.0, r.w - 28.0, 1.0),
        0.0,
        palette::PURPLE.with_alpha(0.33),
    );

    f.text_aligned(
        format!("Stars  {}", hud.stars),
        Vec2::new(r.x + 12.0, r.y + 70.0),
        FontSize::Tiny,
        Align::Left,
        palette::GOLD.opaque(),
    );
    let badge = Rect::new(r.x + r.w - 80.0, r.y + 60.0, 68.0, 22.0);
    f.fill_rect(badge, 8.0, hud.level_color.with_alpha(0.74));
    f.text(
        format!("LV {}", hud.level),
        badge.center(),
        FontSize::Tiny,
        palette::INK.opaque(),
    );

    let fails_color = if hud.fails_warning {
        palette::RED
    } else {
        palette::OFF_WHITE
    };
    f.text_aligned(
        format!("Fails  {}", hud.fails),
        Vec2::new(r.x + 12.0, r.y + 96.0),
        FontSize::Tiny,
        Align::Left,
        fails_color.opaque(),
    );

    if let Some((combo, color)) = hud.combo {
        f.text(
            format!(" x{combo} COMBO!"),
            Vec2::new(cx, r.y + 122.0),
            FontSize::Small,
            color.opaque(),
        );
    }

    let goal = Rect::new(r.x + 10.0, r.y + 136.0, r.w - 20.0, 12.0);
    progress_bar(
        f,
        goal,
        hud.goal_ratio,
        palette::CORAL.mix(palette::LIME, hud.goal_ratio),
        hud.level_color,
    );
    f.text(
        format!("Lvl goal  {}/{}", hud.level_score, hud.target),
        Vec2::new(cx, goal.y + 22.0),
        FontSize::Tiny,
        hud.level_color.mix(palette::WHITE, 0.5).opaque(),
    );

    let clock = Rect::new(r.x + 10.0, r.y + r.h - 28.0, r.w - 20.0, 16.0);
    progress_bar(
        f,
        clock,
        hud.time_ratio,
        palette::RED.mix(palette::LIME, hud.time_ratio),
        palette::PURPLE,
    );
    f.text(
        format!("{}s", hud.seconds_left),
        clock.center(),
        FontSize::Tiny,
        palette::WHITE.opaque(),
    );
}

fn effects(f: &mut Frame, state: &GameState) {
    let fx = &state.effects;
    for p in &fx.particles {
        let alpha = p.life.clamp(0.0, 1.0);
        if p.star {
            f.push(DrawCmd::Polygon {
                points: shapes::star(p.pos, p.radius * 1.4, p.radius * 0.6, 5, 0.0),
                fill: p.color.with_alpha(alpha),
            });
        } else {
            f.circle(p.pos, p.radius, p.color.with_alpha(alpha));
        }
    }
    for text in &fx.floats {
        let size = if text.large {
            FontSize::Large
        } else {
            FontSize::Medium
        };
        f.text(
            text.text.clone(),
            text.pos,
            size,
            text.color.with_alpha(text.life.clamp(0.0, 1.0)),
        );
    }
    for drop in &fx.drops {
        if let Some(ingredient) = state.catalog.ingredient(drop.ingredient) {
            ingredient_icon(f, ingredient, drop.pos(), 15.0 * drop.scale(), drop.angle());
        }
    }
}

fn hint_bar(f: &mut Frame) {
    f.fill_rect(
        Rect::new(0.0, SCREEN_H - HINT_BAR_H, SCREEN_W, HINT_BAR_H),
        0.0,
        Rgb(6, 10, 28).with_alpha(0.65),
    );
    f.text(
        HINT,
        Vec2::new(SCREEN_W / 2.0, SCREEN_H - HINT_BAR_H / 2.0),
        FontSize::Tiny,
        Rgb(62, 100, 160).opaque(),
    );
}

fn level_banner(f: &mut Frame, banner: &LevelBanner) {
    let ease = banner.ease();
    let t = banner.shown_for;
    f.fill_rect(
        Rect::new(0.0, 0.0, SCREEN_W, SCREEN_H),
        0.0,
        Rgb(3, 8, 28).with_alpha(ease * 0.82),
    );

    let card = Rect::new(SCREEN_W / 2.0 - 320.0, SCREEN_H / 2.0 - 160.0, 640.0, 320.0);
    f.fill_rect(card, 28.0, Rgb(8, 28, 12).opaque());
    f.fill_rect(
        Rect::new(card.x, card.y, card.w, card.h * 0.55),
        28.0,
        Rgb(18, 55, 22).with_alpha(0.8),
    );
    let pulse = 0.5 + 0.5 * (t * 3.0).sin().abs();
    f.push(DrawCmd::Rect {
        rect: card,
        radius: 28.0,
        fill: None,
        stroke: Some((palette::LIME.mix(palette::CYAN, pulse).with_alpha(0.78), 3.0)),
    });

    let cx = SCREEN_W / 2.0;
    f.text(banner.title(), Vec2::new(cx, card.y + 72.0), FontSize::Hero, palette::LIME.opaque());
    f.text(banner.label, Vec2::new(cx, card.y + 160.0), FontSize::Large, palette::GOLD.opaque());
    f.text(
        banner.score_line(),
        Vec2::new(cx, card.y + 198.0),
        FontSize::Medium,
        palette::OFF_WHITE.opaque(),
    );
    if let Some(next) = banner.next_line() {
        f.text(
            format!("▶  {next}"),
            Vec2::new(cx, card.y + 236.0),
            FontSize::Small,
            palette::CYAN.opaque(),
        );
    }
    progress_bar(
        f,
        Rect::new(cx - 200.0, card.y + card.h - 28.0, 400.0, 10.0),
        banner.ratio,
        palette::LIME,
        palette::LIME,
    );
}

fn floatie(f: &mut Frame, fl: &Floatie, ease: f32) {
    let c = Vec2::new(fl.x, fl.y);
    let color = fl.color.with_alpha(fl.alpha * ease);
    let rot = fl.rotation.to_radians();
    let size = fl.size;
    match fl.kind {
        SymbolKind::Star | SymbolKind::Snowflake => {
            let spokes = fl.kind.spokes().unwrap_or(5);
            let reach = if fl.kind == SymbolKind::Star { 1.7 } else { 1.6 };
            for (from, to) in shapes::spokes(c, size * reach, spokes, rot) {
                f.push(DrawCmd::Line {
                    from,
                    to,
                    width: (size / 4.0).max(1.0),
                    color,
                });
            }
            if fl.kind == SymbolKind::Star {
                f.circle(c, size / 2.0, color);
            }
        }
        SymbolKind::Heart => {
            let (lobes, r, point) = shapes::heart(c, size);
            for lobe in lobes {
                f.circle(lobe, r, color);
            }
            f.push(DrawCmd::Polygon {
                points: point,
                fill: color,
            });
        }
        SymbolKind::Fish => {
            let (body, tail) = shapes::fish(c, size, false);
            f.push(DrawCmd::Polygon {
                points: body,
                fill: color,
            });
            f.push(DrawCmd::Polygon {
                points: tail,
                fill: fl.color.mix(palette::WHITE, 0.4).with_alpha(fl.alpha * ease),
            });
            f.circle(
                c + Vec2::new(-size / 2.0, -size / 6.0),
                size / 6.0,
                palette::WHITE.with_alpha(fl.alpha * ease),
            );
        }
        SymbolKind::Note => {
            f.circle(c + Vec2::new(0.0, size / 2.0), size / 2.0, color);
            f.fill_rect(
                Rect::new(c.x + size / 3.0, c.y - size, size / 5.0, size * 1.5),
                0.0,
                color,
            );
            f.fill_rect(Rect::new(c.x + size / 3.0, c.y - size, size / 2.0, size / 5.0), 0.0, color);
        }
        SymbolKind::Drop => f.push(DrawCmd::Polygon {
            points: shapes::drop(c, size),
            fill: color,
        }),
        SymbolKind::Zzz => {
            for i in 0..3 {
                f.text(
                    "z".repeat(i + 1),
                    c + Vec2::new(i as f32 * 4.0, -(size / 2.0 + i as f32 * size / 3.0)),
                    FontSize::Small,
                    color,
                );
            }
        }
    }
}

fn end_screen(f: &mut Frame, end: &EndScreen, mascot: &Mascot) {
    let ease = end.ease();
    let phase = end.t;
    let accent = end.accent();
    let cx = SCREEN_W / 2.0;

    f.fill_rect(
        Rect::new(0.0, 0.0, SCREEN_W, SCREEN_H),
        0.0,
        Rgb(3, 5, 18).with_alpha(ease * 0.88),
    );
    for fl in &end.floaties {
        floatie(f, fl, ease);
    }
    for r in (4..=30).rev().step_by(4) {
        let alpha = 0.11 * (1.0 - r as f32 / 30.0).powf(1.5) * ease;
        f.circle(Vec2::new(cx, SCREEN_H / 2.0 - 60.0), r as f32, accent.with_alpha(alpha));
    }

    let card = Rect::new(cx - 360.0, SCREEN_H / 2.0 - 250.0, 720.0, 420.0);
    let (top, bottom) = if end.win {
        (Rgb(18, 38, 88), Rgb(10, 22, 58))
    } else {
        (Rgb(55, 12, 18), Rgb(30, 8, 12))
    };
    f.fill_rect(card, 32.0, bottom.opaque());
    f.fill_rect(Rect::new(card.x, card.y, card.w, card.h * 0.55), 32.0, top.with_alpha(0.8));
    f.push(DrawCmd::Rect {
        rect: card,
        radius: 32.0,
        fill: None,
        stroke: Some((
            accent
                .mix(palette::WHITE, 0.3 + 0.2 * (phase * 2.0).sin().abs())
                .with_alpha(0.78),
            3.0,
        )),
    });

    if end.win {
        // Each letter in its own cycling color
        let title = end.title();
        let advance = FontSize::Hero.px() * 0.62;
        let width = advance * title.chars().count() as f32;
        let y = card.y + 60.0 + (phase * 2.2).sin() * 7.0;
        for (i, ch) in title.chars().enumerate() {
            let hue = (phase * 80.0 + i as f32 * 45.0).to_radians();
            let color = Rgb(
                (255.0 * hue.sin().abs()) as u8,
                (200.0 * hue.cos().abs()) as u8,
                (255.0 * (hue + std::f32::consts::FRAC_PI_2).sin().abs()) as u8,
            );
            f.text(
                ch.to_string(),
                Vec2::new(cx - width / 2.0 + (i as f32 + 0.5) * advance, y),
                FontSize::Hero,
                color.opaque(),
            );
        }
    } else {
        f.text(
            end.title(),
            Vec2::new(cx, card.y + 65.0 + (phase * 3.0).sin() * 4.0),
            FontSize::Hero,
            palette::RED.opaque(),
        );
    }

    f.text(
        end.headline,
        Vec2::new(cx, card.y + 150.0),
        FontSize::Medium,
        accent.mix(palette::WHITE, 0.6).with_alpha(ease),
    );
    f.text(
        end.subtitle,
        Vec2::new(cx, card.y + 188.0),
        FontSize::Small,
        palette::OFF_WHITE.with_alpha(ease * 0.75),
    );

    let stat_y = card.y + 222.0;
    let stats = [
        ("SCORE", group_thousands(end.score), palette::GOLD, cx - 200.0),
        ("STARS", end.stars.to_string(), palette::CYAN, cx),
        ("LEVEL", end.level.to_string(), accent, cx + 200.0),
    ];
    for (label, value, color, x) in stats {
        let rect = Rect::new(x - 65.0, stat_y, 130.0, 55.0);
        f.push(DrawCmd::Rect {
            rect,
            radius: 14.0,
            fill: Some(color.with_alpha(0.18)),
            stroke: Some((color.with_alpha(0.55), 2.0)),
        });
        f.text(value, Vec2::new(x, stat_y + 20.0), FontSize::Large, color.opaque());
        f.text(
            label,
            Vec2::new(x, stat_y + 44.0),
            FontSize::Tiny,
            color.mix(palette::WHITE, 0.5).opaque(),
        );
    }

    let grade_pos = Vec2::new(cx, card.y + 295.0);
    let grade_r = 34.0 + 4.0 * (phase * 2.5).sin().abs();
    f.glow_dot(grade_pos, grade_r, end.grade_color);
    f.circle(grade_pos, grade_r, end.grade_color.mix(Rgb(5, 5, 20), 0.5).opaque());
    f.text(
        end.grade.to_string(),
        grade_pos,
        FontSize::Hero,
        end.grade_color.opaque(),
    );
    f.text(
        "CHEF GRADE",
        grade_pos + Vec2::new(0.0, 48.0),
        FontSize::Small,
        end.grade_color.mix(palette::WHITE, 0.55).opaque(),
    );

    let pulse = 0.6 + 0.4 * (phase * 2.5).sin().abs();
    f.text(
        end.restart_hint(),
        Vec2::new(cx, card.y + card.h - 38.0),
        FontSize::Medium,
        accent.mix(palette::WHITE, pulse).with_alpha(ease * 0.9),
    );
    f.text(
        "ESC = quit",
        Vec2::new(cx, card.y + card.h + 16.0),
        FontSize::Tiny,
        Rgb(60, 80, 130).opaque(),
    );

    // Side penguins celebrate or sulk with the outcome
    for (dx, band) in [(-280.0, palette::GOLD), (280.0, palette::PURPLE)] {
        let pose = Pose {
            happy: end.win,
            sad: !end.win,
            ..Pose::from_mascot(mascot, band)
        };
        penguin(f, Vec2::new(cx + dx, SCREEN_H / 2.0 + 80.0), &pose);
    }

    let corners = [
        (Vec2::new(55.0, 55.0), false, palette::CYAN),
        (Vec2::new(SCREEN_W - 55.0, 55.0), true, palette::PINK),
        (Vec2::new(55.0, SCREEN_H - 55.0), false, palette::GOLD),
        (Vec2::new(SCREEN_W - 55.0, SCREEN_H - 55.0), true, palette::LIME),
    ];
    for (i, (pos, flip, color)) in corners.into_iter().enumerate() {
        let bob = Vec2::new(0.0, (phase * 1.8 + i as f32).sin() * 6.0);
        let (body, tail) = shapes::fish(pos + bob, 22.0, flip);
        f.push(DrawCmd::Polygon {
            points: body,
            fill: color.with_alpha(0.7 * ease),
        });
        f.push(DrawCmd::Polygon {
            points: tail,
            fill: color.with_alpha(0.7 * ease),
        });
    }
}
