use ratatui::prelude::*;

use crate::glyph::SpriteRenderer;
use crate::sprites::{Pixel, SpriteSheet};

/// Character surface the grid is composed onto, one frame at a time.
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Pixel>,
}

impl Canvas {
    pub fn new(width: u16, height: u16, fill: Pixel) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    pub fn put(&mut self, x: i32, y: i32, pixel: Pixel) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = pixel;
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        let width = self.width.max(1) as usize;
        self.cells
            .chunks(width)
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|(ch, style)| Span::styled(String::from(*ch), *style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Draws sheet sprites onto a canvas, scaling nearest-neighbour.
pub struct SpritePainter<'a> {
    pub canvas: &'a mut Canvas,
    pub sheet: &'a SpriteSheet,
}

impl SpriteRenderer for SpritePainter<'_> {
    fn draw_sprite(&mut self, name: &str, x: i32, y: i32, width: i32, height: i32) -> bool {
        let Some(sprite) = self.sheet.get(name) else {
            tracing::warn!(sprite = name, "trying to draw unloaded sprite");
            return false;
        };
        if width <= 0 || height <= 0 || sprite.width() == 0 || sprite.height() == 0 {
            return true;
        }
        for dy in 0..height {
            let sy = dy as usize * sprite.height() / height as usize;
            for dx in 0..width {
                let sx = dx as usize * sprite.width() / width as usize;
                if let Some(pixel) = sprite.pixel(sx, sy) {
                    self.canvas.put(x + dx, y + dy, pixel);
                }
            }
        }
        true
    }
}
