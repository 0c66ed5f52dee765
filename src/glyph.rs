//! Grid to sprite composition.
//!
//! The grid is walked in 2x2 blocks. A block that fits entirely inside the
//! grid is drawn with one of sixteen pre-built glyph sprites, picked by a
//! 4-bit corner mask (bit 0 top-left, bit 1 top-right, bit 2 bottom-left,
//! bit 3 bottom-right). Blocks hanging off an odd trailing row or column fall
//! back to one single-cell sprite per in-bounds cell.

use crate::grid::Grid;

pub const CELL_SELECTED: &str = "spr_cell_selected";
pub const CELL_UNSELECTED: &str = "spr_cell_unselected";

pub const COMPOSITE_NAMES: [&str; 16] = [
    "spr_cells_00",
    "spr_cells_01",
    "spr_cells_02",
    "spr_cells_03",
    "spr_cells_04",
    "spr_cells_05",
    "spr_cells_06",
    "spr_cells_07",
    "spr_cells_08",
    "spr_cells_09",
    "spr_cells_10",
    "spr_cells_11",
    "spr_cells_12",
    "spr_cells_13",
    "spr_cells_14",
    "spr_cells_15",
];

/// Anything that can put a named sprite on screen.
pub trait SpriteRenderer {
    /// Draw `name` stretched over the rectangle. Returns false if the sprite
    /// is unknown; the caller carries on either way.
    fn draw_sprite(&mut self, name: &str, x: i32, y: i32, width: i32, height: i32) -> bool;
}

/// Where the grid lands on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cell_width: i32,
    pub cell_height: i32,
}

impl CellLayout {
    pub fn new(cell_width: i32, cell_height: i32) -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            cell_width,
            cell_height,
        }
    }

    fn cell_origin(&self, x: i32, y: i32) -> (i32, i32) {
        (
            self.origin_x + x * self.cell_width,
            self.origin_y + y * self.cell_height,
        )
    }
}

/// Draw calls issued for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompositeStats {
    pub composite: usize,
    pub single: usize,
    pub failed: usize,
}

impl CompositeStats {
    pub fn total(&self) -> usize {
        self.composite + self.single
    }
}

pub fn block_index(ul: bool, ur: bool, bl: bool, br: bool) -> usize {
    (ul as usize) | (ur as usize) << 1 | (bl as usize) << 2 | (br as usize) << 3
}

pub fn compose<R: SpriteRenderer + ?Sized>(
    grid: &Grid,
    layout: CellLayout,
    renderer: &mut R,
) -> CompositeStats {
    let mut stats = CompositeStats::default();
    let w = grid.width() as i32;
    let h = grid.height() as i32;

    for i in (0..w).step_by(2) {
        for j in (0..h).step_by(2) {
            if i + 2 <= w && j + 2 <= h {
                let idx = block_index(
                    grid.get(i, j),
                    grid.get(i + 1, j),
                    grid.get(i, j + 1),
                    grid.get(i + 1, j + 1),
                );
                let (x, y) = layout.cell_origin(i, j);
                stats.composite += 1;
                if !renderer.draw_sprite(
                    COMPOSITE_NAMES[idx],
                    x,
                    y,
                    layout.cell_width * 2,
                    layout.cell_height * 2,
                ) {
                    stats.failed += 1;
                }
                continue;
            }

            // Partial block: the bottom-right cell is never inside the grid here.
            for (cx, cy) in [(i, j), (i + 1, j), (i, j + 1)] {
                if cx >= w || cy >= h {
                    continue;
                }
                let name = if grid.get(cx, cy) {
                    CELL_SELECTED
                } else {
                    CELL_UNSELECTED
                };
                let (x, y) = layout.cell_origin(cx, cy);
                stats.single += 1;
                if !renderer.draw_sprite(name, x, y, layout.cell_width, layout.cell_height) {
                    stats.failed += 1;
                }
            }
        }
    }

    stats
}
