//! Wave-field grid and propagation step

use serde::{Deserialize, Serialize};

/// Height forced into cells by a disturbance impulse
pub const DISTURBANCE_DEPTH: f32 = -10.0;

const DEFAULT_DAMPING: f32 = 0.95;

/// Double-buffered 2D height field driven by a leapfrog wave update.
///
/// Two same-length buffers are kept at all times: `current` holds the heights
/// readable through [`WaveField::height_at`], `previous` feeds the neighbor
/// averages of the next propagation step. Border cells are never written by
/// propagation, only by disturbance injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveField {
    cols: usize,
    rows: usize,
    cell_size: usize,
    current: Vec<f32>,
    previous: Vec<f32>,
    damping: f32,
}

impl WaveField {
    /// Create a field covering `width x height` world pixels at the given
    /// cell size. Dimensions are floored to whole cells; a minimum of 3x3
    /// keeps the interior non-empty.
    pub fn new(width: usize, height: usize, cell_size: usize) -> Self {
        let cell_size = cell_size.max(1);
        let cols = (width / cell_size).max(3);
        let rows = (height / cell_size).max(3);
        Self {
            cols,
            rows,
            cell_size,
            current: vec![0.0; cols * rows],
            previous: vec![0.0; cols * rows],
            damping: DEFAULT_DAMPING,
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    /// Advance the automaton one step.
    ///
    /// Every interior cell becomes the average of its four orthogonal
    /// neighbors' previous heights (scaled by 2) minus its own current
    /// height, scaled by the damping coefficient. Buffer roles swap
    /// afterwards.
    pub fn update(&mut self) {
        for y in 1..self.rows - 1 {
            for x in 1..self.cols - 1 {
                let neighbors = self.previous[self.idx(x - 1, y)]
                    + self.previous[self.idx(x + 1, y)]
                    + self.previous[self.idx(x, y - 1)]
                    + self.previous[self.idx(x, y + 1)];
                let i = self.idx(x, y);
                self.current[i] = (neighbors / 2.0 - self.current[i]) * self.damping;
            }
        }
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// Inject an impulse at a world-pixel position.
    ///
    /// Cells in the `(2r+1)x(2r+1)` square around the target cell are forced
    /// to [`DISTURBANCE_DEPTH`]. Cells outside the interior are skipped, so
    /// out-of-range disturbances degrade to partial or no-op writes.
    pub fn disturb(&mut self, x: f32, y: f32, radius: i32) {
        let cx = (x / self.cell_size as f32) as i32;
        let cy = (y / self.cell_size as f32) as i32;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let nx = cx + dx;
                let ny = cy + dy;
                if nx > 0 && (nx as usize) < self.cols - 1 && ny > 0 && (ny as usize) < self.rows - 1
                {
                    let i = self.idx(nx as usize, ny as usize);
                    self.previous[i] = DISTURBANCE_DEPTH;
                }
            }
        }
    }

    /// Height of a cell, or 0.0 outside the grid.
    pub fn height_at(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return 0.0;
        }
        self.current[y as usize * self.cols + x as usize]
    }

    /// Sum of absolute heights over both buffers. Used by tests and for
    /// stats logging; decays to zero once disturbances stop.
    pub fn total_energy(&self) -> f32 {
        self.current
            .iter()
            .chain(self.previous.iter())
            .map(|h| h.abs())
            .sum()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Set the damping coefficient. Values outside (0, 1) would let wave
    /// energy grow without bound and are rejected.
    pub fn set_damping(&mut self, damping: f32) {
        if damping > 0.0 && damping < 1.0 {
            self.damping = damping;
        } else {
            log::warn!("ignoring wave damping outside (0, 1): {damping}");
        }
    }
}
