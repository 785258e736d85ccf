//! Shared movable-item state and the environment bounds context

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Environment extents and border margin, passed explicitly into every
/// update instead of living in process-wide state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }
}

/// Base state every simulation item carries.
///
/// Liveness is monotonic: [`Body::kill`] is the only way to change it and
/// there is no way back to alive. Dead items are compacted out of their
/// roster by the orchestrator at the end of the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: i32,
    pub alive: bool,
}

impl Body {
    pub fn new(position: Vec2, size: i32) -> Self {
        Self {
            id: EntityId::new(),
            position,
            velocity: Vec2::ZERO,
            size,
            alive: true,
        }
    }

    /// Advance position by one tick of velocity.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Clear liveness. Irreversible.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
