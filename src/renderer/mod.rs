//! Rendering module
//!
//! The scene builder flattens the game into a list of 2D draw commands in
//! design space (1280x780). A [`RenderSink`] rasterizes them; sinks never
//! read anything back.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod shapes;

use glam::Vec2;

use crate::layout::Rect;
use crate::palette::{Rgb, Rgba};

pub use scene::{SceneExtras, build_frame};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Font size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Tiny,
    Small,
    Medium,
    Large,
    Title,
    Hero,
}

impl FontSize {
    /// Pixel height in design space
    pub fn px(&self) -> f32 {
        match self {
            FontSize::Tiny => 13.0,
            FontSize::Small => 16.0,
            FontSize::Medium => 20.0,
            FontSize::Large => 28.0,
            FontSize::Title => 30.0,
            FontSize::Hero => 64.0,
        }
    }
}

/// A single primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Rounded rectangle, optionally outlined
    Rect {
        rect: Rect,
        radius: f32,
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f32)>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Rgba,
    },
    /// Partial ring, clockwise from 12 o'clock, covering `ratio` of a turn
    Arc {
        center: Vec2,
        radius: f32,
        width: f32,
        ratio: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        fill: Rgba,
    },
    Polygon {
        points: Vec<Vec2>,
        fill: Rgba,
    },
    Text {
        text: String,
        pos: Vec2,
        size: FontSize,
        align: Align,
        color: Rgba,
    },
}

/// Everything drawn in one frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear: Rgb,
    pub cmds: Vec<DrawCmd>,
}

impl Frame {
    pub fn new(clear: Rgb) -> Self {
        Self {
            clear,
            cmds: Vec::with_capacity(512),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn fill_rect(&mut self, rect: Rect, radius: f32, fill: Rgba) {
        self.push(DrawCmd::Rect {
            rect,
            radius,
            fill: Some(fill),
            stroke: None,
        });
    }

    /// Translucent "glass" panel with an optional border
    pub fn panel(&mut self, rect: Rect, radius: f32, fill: Rgba, border: Option<Rgb>) {
        self.push(DrawCmd::Rect {
            rect,
            radius,
            fill: Some(fill),
            stroke: border.map(|c| (c.with_alpha(0.85), 2.0)),
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        self.push(DrawCmd::Circle {
            center,
            radius,
            fill,
        });
    }

    /// Soft glow: a few stacked translucent circles
    pub fn glow_dot(&mut self, center: Vec2, radius: f32, color: Rgb) {
        for (scale, alpha) in [(2.0, 0.08), (1.5, 0.16), (1.0, 0.85)] {
            self.circle(center, radius * scale, color.with_alpha(alpha));
        }
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: FontSize, color: Rgba) {
        self.push(DrawCmd::Text {
            text: text.into(),
            pos,
            size,
            align: Align::Center,
            color,
        });
    }

    pub fn text_aligned(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: FontSize,
        align: Align,
        color: Rgba,
    ) {
        self.push(DrawCmd::Text {
            text: text.into(),
            pos,
            size,
            align,
            color,
        });
    }

    /// Every text string in the frame (handy for tests and logs)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Anything that can display a frame
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);

    /// Window size changed (window pixels)
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Discards frames (headless runs)
#[derive(Debug, Default)]
pub struct NullSink {
    pub frames: u64,
    pub last_cmds: usize,
}

impl RenderSink for NullSink {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        self.last_cmds = frame.cmds.len();
    }
}
