//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

/// Points on a circle, for small round things like shots
pub fn circle(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    (0..segments.max(3))
        .map(|i| {
            let theta = (i as f32 / segments.max(3) as f32) * 2.0 * PI;
            center + Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Axis-aligned rectangle corners, clockwise from top-left
pub fn rect(top_left: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        top_left,
        top_left + Vec2::new(size.x, 0.0),
        top_left + size,
        top_left + Vec2::new(0.0, size.y),
    ]
}

/// Exhaust flame behind a thrusting ship
pub fn flame(rear_left: Vec2, rear_right: Vec2, backward: Vec2, length: f32) -> [Vec2; 3] {
    let mid = (rear_left + rear_right) / 2.0;
    [
        mid + (rear_left - mid) * 0.5,
        mid + backward * length,
        mid + (rear_right - mid) * 0.5,
    ]
}
