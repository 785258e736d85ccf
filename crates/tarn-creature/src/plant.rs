//! Drifting plants: wobble motion, boundary bounce, wave emission

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tarn_wave::WaveField;

use crate::body::Body;
use crate::outline::Outline;

/// Drift speed ceiling
const MAX_DRIFT_SPEED: f32 = 1.0;
/// Wobble phase advance per tick
const WOBBLE_STEP: f32 = 0.05;
/// Amplitude of the oscillating wobble force
const WOBBLE_FORCE: f32 = 0.02;
/// Half-range of per-tick velocity jitter
const JITTER: f32 = 0.05;
/// Half-range of the periodic random direction impulse
const IMPULSE: f32 = 0.05;
/// Ticks between wave emissions
const WAVE_INTERVAL: u32 = 15;
/// Chance that an emission is the stronger, wider one
const STRONG_WAVE_CHANCE: f64 = 0.3;
/// Velocity kept after a boundary bounce (sign flipped)
const BOUNCE_DAMPING: f32 = 0.8;
/// Half-range of the random kick added after a bounce
const BOUNCE_KICK: f32 = 0.1;
/// Distance from the world edge where plants bounce
const BOUNDARY_BUFFER: f32 = 50.0;
/// Blight nodes within this distance of a plant are destroyed
pub const BLIGHT_CLEAR_RADIUS: f32 = 30.0;

/// A drifting plant. Not a creature: it has no energy or health, it only
/// wanders, disturbs the water, and feeds (or disinfects) the rest of the
/// ecosystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub body: Body,
    heading: f32,
    wobble_phase: f32,
    wave_timer: u32,
    direction_countdown: f32,
    acceleration: Vec2,
}

impl Plant {
    pub fn new<R: Rng>(position: Vec2, size: i32, rng: &mut R) -> Self {
        let heading = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = 0.5 + rng.random::<f32>() * 0.5;
        let mut body = Body::new(position, size);
        body.velocity = Vec2::from_angle(heading) * speed;
        Self {
            body,
            heading,
            wobble_phase: 0.0,
            wave_timer: 0,
            direction_countdown: rng.random::<f32>() * 100.0,
            acceleration: Vec2::ZERO,
        }
    }

    /// One tick of drift: impulse countdown, wobble, jitter, speed clamp,
    /// boundary bounce, periodic wave emission.
    pub fn update<R: Rng>(&mut self, field: &mut WaveField, rng: &mut R) {
        self.wobble_phase += WOBBLE_STEP;

        self.direction_countdown -= 1.0;
        if self.direction_countdown <= 0.0 {
            self.acceleration += Vec2::new(
                (rng.random::<f32>() * 2.0 - 1.0) * IMPULSE,
                (rng.random::<f32>() * 2.0 - 1.0) * IMPULSE,
            );
            self.direction_countdown = rng.random_range(50.0..150.0);
        }

        self.body.velocity += self.acceleration;
        self.body.velocity += Vec2::new(
            self.wobble_phase.cos() * WOBBLE_FORCE,
            self.wobble_phase.sin() * WOBBLE_FORCE,
        );

        if self.body.velocity.length() > MAX_DRIFT_SPEED {
            self.body.velocity = self.body.velocity.normalize() * MAX_DRIFT_SPEED;
        }

        self.body.velocity += Vec2::new(
            rng.random::<f32>() * JITTER * 2.0 - JITTER,
            rng.random::<f32>() * JITTER * 2.0 - JITTER,
        );

        self.body.integrate();
        if self.body.velocity != Vec2::ZERO {
            self.heading = self.body.velocity.y.atan2(self.body.velocity.x);
        }

        self.wave_timer += 1;
        if self.wave_timer >= WAVE_INTERVAL {
            self.emit_wave(field, rng);
            self.wave_timer = 0;
        }

        self.bounce(field, rng);
        self.acceleration = Vec2::ZERO;
    }

    /// Organic water disturbance: occasionally stronger and wider.
    fn emit_wave<R: Rng>(&self, field: &mut WaveField, rng: &mut R) {
        let radius = if rng.random_bool(STRONG_WAVE_CHANCE) {
            2
        } else {
            1
        };
        field.disturb(self.body.position.x, self.body.position.y, radius);
    }

    /// Reflect off the field edges with energy loss, plus a small random
    /// kick so plants do not stick to the walls.
    fn bounce<R: Rng>(&mut self, field: &WaveField, rng: &mut R) {
        let max_x = (field.cols() * field.cell_size()) as f32 - BOUNDARY_BUFFER;
        let max_y = (field.rows() * field.cell_size()) as f32 - BOUNDARY_BUFFER;
        let mut bounced = false;

        if self.body.position.x < BOUNDARY_BUFFER {
            self.body.position.x = BOUNDARY_BUFFER;
            self.body.velocity.x *= -BOUNCE_DAMPING;
            bounced = true;
        } else if self.body.position.x > max_x {
            self.body.position.x = max_x;
            self.body.velocity.x *= -BOUNCE_DAMPING;
            bounced = true;
        }

        if self.body.position.y < BOUNDARY_BUFFER {
            self.body.position.y = BOUNDARY_BUFFER;
            self.body.velocity.y *= -BOUNCE_DAMPING;
            bounced = true;
        } else if self.body.position.y > max_y {
            self.body.position.y = max_y;
            self.body.velocity.y *= -BOUNCE_DAMPING;
            bounced = true;
        }

        if bounced {
            self.body.velocity += Vec2::new(
                rng.random::<f32>() * BOUNCE_KICK * 2.0 - BOUNCE_KICK,
                rng.random::<f32>() * BOUNCE_KICK * 2.0 - BOUNCE_KICK,
            );
        }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Collision silhouette: a central body circle plus three leaf lobes
    /// positioned and rotated by the current heading.
    pub fn outline(&self) -> Outline {
        let s = self.body.size as f32;
        let pos = self.body.position;
        let mut outline = Outline::new();
        outline.push_circle(pos, s / 3.0);

        let leaf_radii = Vec2::new(s / 4.0, s / 8.0);
        for local_center in [
            Vec2::new(-s / 12.0, -3.0 * s / 8.0),
            Vec2::new(0.0, -5.0 * s / 24.0),
            Vec2::new(-s / 12.0, -s / 8.0),
        ] {
            outline.push_ellipse(local_center, leaf_radii, self.heading, pos);
        }
        outline
    }

    /// True if a blight node at `pos` is close enough for this plant to
    /// destroy it.
    pub fn clears_blight_at(&self, pos: Vec2) -> bool {
        self.body.position.distance(pos) < BLIGHT_CLEAR_RADIUS
    }
}
