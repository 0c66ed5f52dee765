//! The LED cell grid.
//!
//! A row-major matrix of lit/unlit cells. Reads outside the grid return
//! `false` and writes outside the grid are ignored, so games can draw shapes
//! that hang off the edges without clipping them first.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    NegativeDimension { width: i32, height: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::NegativeDimension { width, height } => {
                write!(f, "grid dimensions must not be negative ({}x{})", width, height)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Which way up the console screen is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    LeftDown,
    UpsideDown,
    RightDown,
}

impl Orientation {
    pub fn all() -> &'static [Orientation] {
        &[
            Orientation::Normal,
            Orientation::LeftDown,
            Orientation::UpsideDown,
            Orientation::RightDown,
        ]
    }

    pub fn next(self) -> Orientation {
        let all = Self::all();
        let idx = all.iter().position(|o| *o == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Clockwise rotation in degrees applied when the grid is presented.
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Normal => 0,
            Orientation::RightDown => 90,
            Orientation::UpsideDown => 180,
            Orientation::LeftDown => 270,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a grid from signed dimensions, rejecting negative sizes.
    pub fn try_new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < 0 || height < 0 {
            return Err(GridError::NegativeDimension { width, height });
        }
        Ok(Self::new(width as usize, height as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.cells[i]).unwrap_or(false)
    }

    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = value;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Set every cell in rows `start..end`. Rows past the bottom are skipped.
    pub fn fill_rows(&mut self, start: usize, end: usize, value: bool) {
        let end = end.min(self.height);
        if start >= end {
            return;
        }
        self.cells[start * self.width..end * self.width].fill(value);
    }

    #[cfg(test)]
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Move one unit per axis toward the target size.
    ///
    /// The grid is rebuilt whenever its size changes, so contents are lost.
    /// Returns true if the size changed.
    pub fn step_toward(&mut self, target_width: usize, target_height: usize) -> bool {
        let width = step_one(self.width, target_width);
        let height = step_one(self.height, target_height);
        if width == self.width && height == self.height {
            return false;
        }
        *self = Grid::new(width, height);
        true
    }

    /// A copy of the grid as seen with the screen held in `orientation`.
    pub fn rotated(&self, orientation: Orientation) -> Grid {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut out = match orientation {
            Orientation::Normal | Orientation::UpsideDown => Grid::new(self.width, self.height),
            Orientation::LeftDown | Orientation::RightDown => Grid::new(self.height, self.width),
        };
        for y in 0..h {
            for x in 0..w {
                if !self.get(x, y) {
                    continue;
                }
                let (nx, ny) = match orientation {
                    Orientation::Normal => (x, y),
                    Orientation::RightDown => (h - 1 - y, x),
                    Orientation::UpsideDown => (w - 1 - x, h - 1 - y),
                    Orientation::LeftDown => (y, w - 1 - x),
                };
                out.set(nx, ny, true);
            }
        }
        out
    }
}

fn step_one(current: usize, target: usize) -> usize {
    if current < target {
        current + 1
    } else if current > target {
        current - 1
    } else {
        current
    }
}
