//! Software rasterizer implementing the simulation's render surface
//!
//! Good enough for snapshots and debugging, not a real renderer: alpha
//! blending, scanline polygon fill, stepped lines. Text is skipped; the
//! overlay stats only make sense in a windowed host with a font stack.

use glam::Vec2;
use tarn_core::{Color, Surface};

pub struct PixmapSurface {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl PixmapSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width * height],
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let alpha = color[3] as f32 / 255.0;
        let dst = &mut self.pixels[idx];
        for c in 0..3 {
            dst[c] = (color[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha)) as u8;
        }
    }

    /// Write the frame as binary PPM (P6).
    pub fn write_ppm(&self, path: &std::path::Path) -> std::io::Result<()> {
        use std::io::Write;
        let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for pixel in &self.pixels {
            out.write_all(pixel)?;
        }
        Ok(())
    }
}

impl Surface for PixmapSurface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let x0 = min.x.floor() as i32;
        let y0 = min.y.floor() as i32;
        let x1 = (min.x + size.x).ceil() as i32;
        let y1 = (min.y + size.y).ceil() as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let x0 = (center.x - radius).floor() as i32;
        let y0 = (center.y - radius).floor() as i32;
        let x1 = (center.x + radius).ceil() as i32;
        let y1 = (center.y + radius).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if d <= radius {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let reach = radius + width;
        let x0 = (center.x - reach).floor() as i32;
        let y0 = (center.y - reach).floor() as i32;
        let x1 = (center.x + reach).ceil() as i32;
        let y1 = (center.y + reach).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if (d - radius).abs() <= width / 2.0 + 0.5 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let y_min = points.iter().map(|p| p.y).fold(f32::MAX, f32::min).floor() as i32;
        let y_max = points.iter().map(|p| p.y).fold(f32::MIN, f32::max).ceil() as i32;

        for y in y_min..=y_max {
            let scan = y as f32 + 0.5;
            let mut crossings: Vec<f32> = Vec::new();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                    let t = (scan - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            for pair in crossings.chunks_exact(2) {
                for x in pair[0].floor() as i32..=pair[1].ceil() as i32 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let length = from.distance(to);
        let steps = length.ceil().max(1.0) as i32;
        let half = (width / 2.0).ceil() as i32;
        for step in 0..=steps {
            let p = from.lerp(to, step as f32 / steps as f32);
            for dy in -half..=half {
                for dx in -half..=half {
                    self.blend_pixel(p.x as i32 + dx, p.y as i32 + dy, color);
                }
            }
        }
    }

    fn draw_text(&mut self, _position: Vec2, _text: &str, _color: Color) {
        // No font stack in the headless rasterizer
    }
}
