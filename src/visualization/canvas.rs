//! Canvas space to Bevy world space.

use bevy::math::{DVec2, Vec2};

/// Convert a canvas point (origin top-left, y down) to Bevy 2D world
/// coordinates (origin at the canvas center, y up).
pub fn canvas_to_world(point: DVec2, width: f64, height: f64) -> Vec2 {
    Vec2::new(
        (point.x - width / 2.0) as f32,
        (height / 2.0 - point.y) as f32,
    )
}
