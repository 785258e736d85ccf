//! Feeler rays for cheap directional proximity detection
//!
//! Three fixed-length rays (forward and one rotated to each side) stand in
//! for a full sensory field. Detection is a perpendicular point-to-segment
//! distance test, so targets behind the creature are simply not seen; that
//! false-negative behavior is part of the design, not a bug.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ray fan cast from a creature's position along its direction of travel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Feelers {
    pub length: f32,
    pub half_angle: f32,
}

impl Default for Feelers {
    fn default() -> Self {
        Self {
            length: 100.0,
            half_angle: std::f32::consts::FRAC_PI_4,
        }
    }
}

impl Feelers {
    pub fn new(length: f32, half_angle: f32) -> Self {
        Self { length, half_angle }
    }

    /// Endpoints of the three rays from `origin` along `direction`.
    /// A zero direction collapses all rays onto the origin.
    pub fn ray_ends(&self, origin: Vec2, direction: Vec2) -> [Vec2; 3] {
        let forward = direction.normalize_or_zero() * self.length;
        [
            origin + forward,
            origin + Vec2::from_angle(-self.half_angle).rotate(forward),
            origin + Vec2::from_angle(self.half_angle).rotate(forward),
        ]
    }

    /// True if `target` sits within `target_size / 2` of any ray.
    pub fn detects(&self, origin: Vec2, direction: Vec2, target: Vec2, target_size: i32) -> bool {
        let threshold = target_size as f32 / 2.0;
        self.ray_ends(origin, direction)
            .iter()
            .any(|&end| point_to_segment_distance(origin, end, target) < threshold)
    }
}

/// Distance from `point` to the segment `start..end`. Falls back to endpoint
/// distance when the projection lies outside the segment; a degenerate
/// zero-length segment measures to `start`.
pub fn point_to_segment_distance(start: Vec2, end: Vec2, point: Vec2) -> f32 {
    let line = end - start;
    let len = line.length();
    if len < f32::EPSILON {
        return start.distance(point);
    }
    let proj = (point - start).dot(line) / len;
    if proj < 0.0 {
        start.distance(point)
    } else if proj > len {
        end.distance(point)
    } else {
        let along = line / len * proj;
        ((point - start) - along).length()
    }
}
