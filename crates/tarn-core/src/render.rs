//! Host-facing render abstraction and the world draw pass
//!
//! The simulation never talks to a window or GPU. The host hands
//! [`World::render`](crate::World::render) anything implementing [`Surface`]
//! and the draw pass describes the scene through a handful of primitive
//! fills. Everything here is a pure read of simulation state.

use glam::Vec2;
use tarn_creature::{Plant, Prey};
use tarn_wave::WaveField;

use crate::blight::BlightNetwork;

/// RGBA color, straight alpha.
pub type Color = [u8; 4];

/// Primitive drawing operations supplied by the host.
pub trait Surface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn draw_text(&mut self, position: Vec2, text: &str, color: Color);
}

/// Water cells: deeper blue the lower the height.
pub(crate) fn draw_field(field: &WaveField, surface: &mut dyn Surface) {
    let cell = field.cell_size() as f32;
    for y in 0..field.rows() as i32 {
        for x in 0..field.cols() as i32 {
            let height = field.height_at(x, y);
            let blue = (200.0 + height * 10.0).clamp(0.0, 255.0) as u8;
            surface.fill_rect(
                Vec2::new(x as f32 * cell, y as f32 * cell),
                Vec2::splat(cell),
                [0, 0, blue, 255],
            );
        }
    }
}

pub(crate) fn draw_blight(blight: &BlightNetwork, surface: &mut dyn Surface) {
    for (start, end) in blight.connection_segments() {
        surface.draw_line(start, end, 0.5, [100, 0, 100, 100]);
    }

    for branch in blight.fractal_branches() {
        let width = (2.5 - branch.depth as f32 * 0.5).max(0.5);
        let hue = (branch.depth * 30 % 360) as f32;
        let [r, g, b] = hsv_to_rgb(hue, 0.8, 0.7);
        surface.draw_line(branch.start, branch.end, width, [r, g, b, 120]);
    }

    for (start, end, generation) in blight.connector_segments() {
        let blue = (180 + generation * 20).min(255) as u8;
        surface.draw_line(start, end, 1.0, [180, 0, blue, 200]);
    }

    let cell = blight.cell_size();
    for (_, center, generation) in blight.nodes() {
        let tint = (180 + generation * 15).min(255) as u8;
        let diameter = (cell - generation as f32).max(cell / 2.0);
        surface.fill_circle(center, diameter / 2.0, [tint, 0, tint, 255]);
    }
}

pub(crate) fn draw_plant(plant: &Plant, debug_overlay: bool, surface: &mut dyn Surface) {
    let pos = plant.body.position;
    let size = plant.body.size as f32;
    let heading = plant.heading();

    // Stem: a thin rotated bar through the body
    let rot = Vec2::from_angle(heading);
    let stem: Vec<Vec2> = [
        Vec2::new(-2.0, -size / 2.0),
        Vec2::new(2.0, -size / 2.0),
        Vec2::new(2.0, size / 2.0),
        Vec2::new(-2.0, size / 2.0),
    ]
    .iter()
    .map(|&corner| pos + rot.rotate(corner))
    .collect();
    surface.fill_polygon(&stem, [0, 100, 0, 255]);

    // Leaf lobes reuse the collision outline's ellipse parts
    let outline = plant.outline();
    for leaf in outline.parts.iter().skip(1) {
        surface.fill_polygon(leaf, [0, 150, 0, 255]);
    }

    if debug_overlay {
        for part in &outline.parts {
            surface.fill_polygon(part, [0, 255, 0, 30]);
        }
        surface.stroke_circle(
            pos,
            tarn_creature::plant::BLIGHT_CLEAR_RADIUS,
            1.0,
            [0, 150, 0, 30],
        );
        surface.draw_text(
            pos + Vec2::new(0.0, size + 20.0),
            &format!("v:({:.1},{:.1})", plant.body.velocity.x, plant.body.velocity.y),
            [0, 100, 0, 255],
        );
    }
}

pub(crate) fn draw_prey(prey: &Prey, debug_overlay: bool, surface: &mut dyn Surface) {
    let creature = &prey.creature;
    let pos = creature.body.position;
    let size = creature.body.size as f32;
    let infected = creature.infected;
    let body_color: Color = if infected {
        [200, 0, 0, 255]
    } else {
        [255, 165, 0, 255]
    };

    surface.fill_circle(pos, size / 2.0, body_color);

    // Face the direction of travel: features sit in a frame rotated a
    // quarter turn past the heading
    let rot = Vec2::from_angle(creature.heading + std::f32::consts::FRAC_PI_2);
    for eye in [
        Vec2::new(size / 4.0, -size / 4.0),
        Vec2::new(-size / 4.0, -size / 4.0),
    ] {
        surface.fill_circle(pos + rot.rotate(eye), size / 12.0, [0, 0, 0, 255]);
    }

    let tail: Vec<Vec2> = (0..12)
        .map(|i| {
            let t = std::f32::consts::TAU * i as f32 / 12.0;
            let local = Vec2::new(0.0, size / 2.0)
                + Vec2::new(t.cos() * size / 4.0, t.sin() * size / 6.0);
            pos + rot.rotate(local)
        })
        .collect();
    let darker = |c: u8| (c as f32 * 0.7) as u8;
    surface.fill_polygon(
        &tail,
        [darker(body_color[0]), darker(body_color[1]), darker(body_color[2]), 255],
    );

    if infected {
        for marker in &prey.markers {
            let at = pos + rot.rotate(marker.offset * size / 2.0);
            surface.fill_circle(at, marker.size / 2.0, [0, 0, 0, 255]);
        }
    }

    if debug_overlay {
        let feeler_color: Color = if infected {
            [200, 0, 0, 100]
        } else {
            [200, 200, 200, 100]
        };
        for end in creature
            .feelers
            .ray_ends(pos, creature.body.velocity)
        {
            surface.draw_line(pos, end, 1.0, feeler_color);
        }

        let energy_color: Color = if creature.state == tarn_creature::HealthState::Sick {
            [200, 0, 0, 255]
        } else {
            [0, 0, 0, 255]
        };
        let mut line = pos - Vec2::new(0.0, size + 60.0);
        let step = Vec2::new(0.0, 14.0);
        surface.draw_text(line, &format!("Size   : {:.2}", size), [0, 0, 0, 255]);
        line += step;
        surface.draw_text(
            line,
            &format!("Speed  : {:.2}", creature.body.velocity.length()),
            [0, 0, 0, 255],
        );
        line += step;
        surface.draw_text(line, &format!("Energy : {:.2}", creature.energy), energy_color);
        line += step;
        let (status, status_color): (&str, Color) = if infected {
            ("Infected", [200, 0, 0, 255])
        } else {
            ("Healthy", [0, 150, 0, 255])
        };
        surface.draw_text(line, status, status_color);
    }
}

/// Hue in degrees, saturation and value in [0, 1].
fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let c = value * saturation;
    let h = (hue / 60.0) % 6.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    [
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ]
}
