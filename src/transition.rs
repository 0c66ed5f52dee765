//! The wipe animation played while switching games.
//!
//! Progress runs from 0 to 200 percent. The first half (closing) fills the
//! grid from the top down; the game switch happens once closing reaches 100.
//! The second half (opening) empties the filled band from the top, revealing
//! the new game.

use crate::grid::Grid;

pub const DEFAULT_STEP: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Closing,
    Opening,
}

#[derive(Debug, Clone)]
pub struct Transition {
    stage: Stage,
    percent: f64,
    step: f64,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl Transition {
    pub fn new(step: f64) -> Self {
        Self {
            stage: Stage::Idle,
            percent: 0.0,
            step,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle
    }

    pub fn start(&mut self) {
        self.stage = Stage::Closing;
        self.percent = 0.0;
    }

    /// Advance one frame. Returns true on the frame the screen is fully
    /// covered and the games should be swapped.
    pub fn advance(&mut self) -> bool {
        match self.stage {
            Stage::Idle => false,
            Stage::Closing => {
                if self.percent < 100.0 {
                    self.percent += self.step;
                    false
                } else {
                    self.stage = Stage::Opening;
                    true
                }
            }
            Stage::Opening => {
                if self.percent < 200.0 {
                    self.percent += self.step;
                } else {
                    self.percent = 0.0;
                    self.stage = Stage::Idle;
                }
                false
            }
        }
    }

    pub fn apply(&self, grid: &mut Grid) {
        wipe(grid, self.percent);
    }
}

/// Force the wipe band for `percent` on top of whatever is in the grid.
pub fn wipe(grid: &mut Grid, percent: f64) {
    let height = grid.height() as f64;
    if percent > 0.0 && percent <= 100.0 {
        // every row whose index is below the boundary
        let end = (height * percent / 100.0).ceil() as usize;
        grid.fill_rows(0, end, true);
    } else if percent > 100.0 && percent <= 200.0 {
        let start = (height * (percent - 100.0) / 100.0) as usize;
        grid.fill_rows(start, grid.height(), true);
    }
}
