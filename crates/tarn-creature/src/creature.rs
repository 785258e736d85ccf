//! Creature vitals: metabolism, health state machine, border avoidance

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tarn_wave::WaveField;

use crate::body::{Body, Bounds};
use crate::feelers::Feelers;

/// Energy ceiling shared by all creatures
pub const MAX_ENERGY: f32 = 100.0;
/// Below this a Normal creature falls Sick
pub const LOW_ENERGY: f32 = 20.0;

/// Ticks a Sick creature survives without healing
const SICK_COUNTDOWN: i32 = 100;
/// Energy drained per tick is speed * size * this
const METABOLIC_RATE: f32 = 0.001;
/// Fraction of surplus energy converted into size growth
const GROWTH_RATE: f32 = 0.1;
/// Fraction of max energy restored by healing
const HEAL_FRACTION: f32 = 0.3;

const BORDER_THRESHOLD: f32 = 200.0;
const BORDER_REPULSION: f32 = 3000.0;

/// Health state machine. The only transitions are Normal -> Sick -> Dead
/// and Sick -> Normal (heal); Dead is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthState {
    Normal,
    Sick,
    Dead,
}

/// Mobile entity with energy, health, and feeler-based detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub body: Body,
    pub heading: f32,
    pub speed: f32,
    pub base_speed: f32,
    pub energy: f32,
    pub state: HealthState,
    pub sick_countdown: i32,
    pub infected: bool,
    pub feelers: Feelers,
}

impl Creature {
    pub fn new(position: Vec2, size: i32, speed: f32) -> Self {
        Self {
            body: Body::new(position, size),
            heading: 0.0,
            speed,
            base_speed: speed,
            energy: MAX_ENERGY,
            state: HealthState::Normal,
            sick_countdown: 0,
            infected: false,
            feelers: Feelers::default(),
        }
    }

    /// Base per-tick step: integrate, perturb the medium at the new
    /// position, recompute heading from velocity, run metabolism, steer
    /// away from borders.
    pub fn update(&mut self, field: &mut WaveField, bounds: &Bounds) {
        self.body.integrate();
        field.disturb(self.body.position.x, self.body.position.y, 1);

        if self.body.velocity != Vec2::ZERO {
            self.heading = self.body.velocity.y.atan2(self.body.velocity.x);
        }
        self.update_energy();
        self.avoid_borders(bounds);
    }

    fn update_energy(&mut self) {
        let cost = self.speed * self.body.size as f32 * METABOLIC_RATE;
        self.energy = (self.energy - cost).max(0.0);

        if self.energy < LOW_ENERGY && self.state == HealthState::Normal {
            self.state = HealthState::Sick;
            self.sick_countdown = SICK_COUNTDOWN;
            self.base_speed = self.speed;
            self.speed = self.base_speed / 2.0;
        }
        if self.state == HealthState::Sick {
            self.sick_countdown -= 1;
            if self.sick_countdown <= 0 {
                self.state = HealthState::Dead;
                self.body.kill();
                log::debug!("creature {} died", self.body.id);
            }
        }
        if self.energy > MAX_ENERGY {
            let extra = self.energy - MAX_ENERGY;
            self.body.size += (extra * GROWTH_RATE) as i32;
            self.energy = MAX_ENERGY;
        }
    }

    /// Inverse-square repulsion from each border that is closer than the
    /// threshold (past the margin), then renormalize to current speed.
    fn avoid_borders(&mut self, bounds: &Bounds) {
        let mut force = Vec2::ZERO;
        let pos = self.body.position;

        let d_left = (pos.x - bounds.margin).max(1.0);
        if d_left < BORDER_THRESHOLD {
            force.x += BORDER_REPULSION / (d_left * d_left);
        }
        let d_right = ((bounds.width - bounds.margin) - pos.x).max(1.0);
        if d_right < BORDER_THRESHOLD {
            force.x -= BORDER_REPULSION / (d_right * d_right);
        }
        let d_top = (pos.y - bounds.margin).max(1.0);
        if d_top < BORDER_THRESHOLD {
            force.y += BORDER_REPULSION / (d_top * d_top);
        }
        let d_bottom = ((bounds.height - bounds.margin) - pos.y).max(1.0);
        if d_bottom < BORDER_THRESHOLD {
            force.y -= BORDER_REPULSION / (d_bottom * d_bottom);
        }

        self.body.velocity += force;
        self.body.velocity = self.body.velocity.normalize_or_zero() * self.speed;
    }

    /// Feeler detection against another item's position and size.
    pub fn detects(&self, target: Vec2, target_size: i32) -> bool {
        self.feelers
            .detects(self.body.position, self.body.velocity, target, target_size)
    }

    /// Force the Sick state via infection. No-op when already infected;
    /// Dead is terminal and cannot be re-entered by infection.
    pub fn infect(&mut self) {
        if !self.infected && self.state != HealthState::Dead {
            self.infected = true;
            self.state = HealthState::Sick;
            self.sick_countdown = SICK_COUNTDOWN;
        }
    }

    /// Clear infection, return to Normal, restore part of the energy pool.
    /// Dead creatures stay dead.
    pub fn heal(&mut self) {
        if self.state == HealthState::Dead {
            return;
        }
        self.infected = false;
        self.state = HealthState::Normal;
        self.energy = (self.energy + MAX_ENERGY * HEAL_FRACTION).min(MAX_ENERGY);
    }
}
