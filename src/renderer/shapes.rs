//! Outline generation for the procedural icons and decorations

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Unit vector at `angle` radians
fn dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Regular polygon approximating a circle
pub fn circle(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| center + dir(i as f32 / segments as f32 * TAU) * radius)
        .collect()
}

/// Star outline with `spikes` points, first spike at `rotation` radians
pub fn star(center: Vec2, outer: f32, inner: f32, spikes: u32, rotation: f32) -> Vec<Vec2> {
    let spikes = spikes.max(2);
    let step = PI / spikes as f32;
    (0..spikes * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            center + dir(rotation - PI / 2.0 + i as f32 * step) * r
        })
        .collect()
}

/// Radial spoke segments (snowflakes, sparkles)
pub fn spokes(center: Vec2, length: f32, count: u32, rotation: f32) -> Vec<(Vec2, Vec2)> {
    (0..count)
        .map(|i| {
            let a = rotation + i as f32 / count as f32 * TAU;
            (center, center + dir(a) * length)
        })
        .collect()
}

/// Heart: two lobes plus a point, returned as (lobe centers, lobe radius, triangle)
pub fn heart(center: Vec2, size: f32) -> ([Vec2; 2], f32, Vec<Vec2>) {
    let r = size / 2.0;
    let lobes = [
        center + Vec2::new(-r, -r / 2.0),
        center + Vec2::new(r, -r / 2.0),
    ];
    let point = vec![
        center + Vec2::new(-size, -r / 2.0),
        center + Vec2::new(size, -r / 2.0),
        center + Vec2::new(0.0, size),
    ];
    (lobes, r, point)
}

/// Fish body and tail, facing left (mirror with `flip`)
pub fn fish(center: Vec2, size: f32, flip: bool) -> (Vec<Vec2>, Vec<Vec2>) {
    let sx = if flip { -1.0 } else { 1.0 };
    let p = |x: f32, y: f32| center + Vec2::new(x * size * sx, y * size);
    let body = vec![
        p(-1.0, 0.0),
        p(-0.33, -0.5),
        p(0.5, -0.33),
        p(1.0, 0.0),
        p(0.5, 0.33),
        p(-0.33, 0.5),
    ];
    let tail = vec![p(0.5, -0.33), p(1.0, -0.5), p(1.0, 0.5), p(0.5, 0.33)];
    (body, tail)
}

/// Water drop (diamond-ish)
pub fn drop(center: Vec2, size: f32) -> Vec<Vec2> {
    vec![
        center + Vec2::new(0.0, -size),
        center + Vec2::new(-size / 2.0, 0.0),
        center + Vec2::new(0.0, size / 2.0),
        center + Vec2::new(size / 2.0, 0.0),
    ]
}

/// Triangle pointing down (beaks, order arrows)
pub fn beak(top_center: Vec2, half_width: f32, height: f32) -> Vec<Vec2> {
    vec![
        top_center + Vec2::new(-half_width, 0.0),
        top_center + Vec2::new(half_width, 0.0),
        top_center + Vec2::new(0.0, height),
    ]
}

/// Wavy aurora band across `width`, sampled every `step` px
pub fn aurora_band(
    width: f32,
    base_y: f32,
    amplitude: f32,
    thickness: f32,
    phase: f32,
    step: f32,
) -> Vec<Vec2> {
    let step = step.max(1.0);
    let samples = (width / step).ceil() as usize + 2;
    let top: Vec<Vec2> = (0..samples)
        .map(|i| {
            let x = i as f32 * step;
            Vec2::new(x, base_y + (x * 0.007 + phase).sin() * amplitude)
        })
        .collect();
    let mut band = top.clone();
    band.extend(top.iter().rev().map(|p| *p + Vec2::Y * thickness));
    band
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_alternates_radius() {
        let c = Vec2::new(10.0, 10.0);
        let pts = star(c, 10.0, 4.0, 5, 0.0);
        assert_eq!(pts.len(), 10);
        assert!((pts[0].distance(c) - 10.0).abs() < 1e-4);
        assert!((pts[1].distance(c) - 4.0).abs() < 1e-4);
        // First spike points straight up
        assert!((pts[0] - Vec2::new(10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_circle_min_segments() {
        assert_eq!(circle(Vec2::ZERO, 1.0, 0).len(), 3);
        assert_eq!(circle(Vec2::ZERO, 1.0, 24).len(), 24);
    }

    #[test]
    fn test_fish_flip_mirrors() {
        let (body, _) = fish(Vec2::ZERO, 10.0, false);
        let (flipped, _) = fish(Vec2::ZERO, 10.0, true);
        assert_eq!(body[0].x, -flipped[0].x);
        assert_eq!(body[0].y, flipped[0].y);
    }

    #[test]
    fn test_aurora_band_is_closed_strip() {
        let band = aurora_band(100.0, 50.0, 10.0, 30.0, 0.0, 20.0);
        let half = band.len() / 2;
        assert_eq!(band.len() % 2, 0);
        assert_eq!(band[half - 1] + Vec2::Y * 30.0, band[half]);
    }
}
