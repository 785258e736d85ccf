//! Composite convex outlines and polygon intersection
//!
//! Entity silhouettes are unions of convex parts (sampled circles and
//! rotated ellipses). Eating and contact tests ask whether any part of one
//! outline overlaps any part of another, via separating-axis tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Vertices sampled per ellipse part. Enough that the polygon hugs the
/// curve at entity sizes (tens of pixels) without bloating the tests.
const ELLIPSE_SEGMENTS: usize = 16;

/// A union of convex polygons in world coordinates, counter-clockwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outline {
    pub parts: Vec<Vec<Vec2>>,
}

impl Outline {
    /// Start an empty outline.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Add a circle part centered at `center`.
    pub fn push_circle(&mut self, center: Vec2, radius: f32) {
        self.push_ellipse(Vec2::ZERO, Vec2::splat(radius), 0.0, center);
    }

    /// Add an ellipse part described in a local frame: `local_center` and
    /// `radii` are rotated by `rotation` about the frame origin, then the
    /// frame is moved to `translation`.
    pub fn push_ellipse(
        &mut self,
        local_center: Vec2,
        radii: Vec2,
        rotation: f32,
        translation: Vec2,
    ) {
        let rot = Vec2::from_angle(rotation);
        let part = (0..ELLIPSE_SEGMENTS)
            .map(|i| {
                let t = std::f32::consts::TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
                let local = local_center + Vec2::new(t.cos() * radii.x, t.sin() * radii.y);
                translation + rot.rotate(local)
            })
            .collect();
        self.parts.push(part);
    }

    /// Non-empty overlap test against another outline.
    pub fn intersects(&self, other: &Outline) -> bool {
        self.parts
            .iter()
            .any(|a| other.parts.iter().any(|b| convex_overlap(a, b)))
    }

    /// True if the point lies inside any part.
    pub fn contains(&self, point: Vec2) -> bool {
        self.parts.iter().any(|part| convex_contains(part, point))
    }
}

/// Separating-axis overlap test for two convex polygons.
fn convex_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    !has_separating_axis(a, b) && !has_separating_axis(b, a)
}

fn has_separating_axis(edges_of: &[Vec2], other: &[Vec2]) -> bool {
    for i in 0..edges_of.len() {
        let edge = edges_of[(i + 1) % edges_of.len()] - edges_of[i];
        let axis = Vec2::new(-edge.y, edge.x);
        let (min_a, max_a) = project(edges_of, axis);
        let (min_b, max_b) = project(other, axis);
        if max_a < min_b || max_b < min_a {
            return true;
        }
    }
    false
}

fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for p in points {
        let d = p.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// Point-in-convex-polygon for counter-clockwise vertices.
fn convex_contains(part: &[Vec2], point: Vec2) -> bool {
    if part.len() < 3 {
        return false;
    }
    for i in 0..part.len() {
        let edge = part[(i + 1) % part.len()] - part[i];
        let to_point = point - part[i];
        if edge.perp_dot(to_point) < 0.0 {
            return false;
        }
    }
    true
}
