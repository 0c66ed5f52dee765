//! Named sprites, built once at startup and handed to the renderer.

use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};

use crate::glyph::{CELL_SELECTED, CELL_UNSELECTED, COMPOSITE_NAMES};

pub const LCD_BG: Color = Color::Rgb(109, 120, 92);
pub const LCD_GHOST: Color = Color::Rgb(97, 112, 91);
pub const LCD_INK: Color = Color::Rgb(0, 0, 0);

pub type Pixel = (char, Style);

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Sprite {
    /// `pixels` is row-major and must hold `width * height` entries.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

#[derive(Debug, Default)]
pub struct SpriteSheet {
    sprites: HashMap<String, Sprite>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, name: &str, sprite: Sprite) {
        tracing::debug!(
            sprite = name,
            width = sprite.width(),
            height = sprite.height(),
            "loaded sprite"
        );
        self.sprites.insert(name.to_string(), sprite);
    }

    fn load_pixels(&mut self, name: &str, width: usize, height: usize, pixels: Vec<Pixel>) {
        match Sprite::new(width, height, pixels) {
            Some(sprite) => self.load(name, sprite),
            None => tracing::warn!(sprite = name, width, height, "sprite size does not match its pixels"),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// The LCD cell set: lit and unlit single cells plus the sixteen 2x2
    /// corner combinations, each cell `cell_w` x `cell_h` characters.
    pub fn brick_console(cell_w: u16, cell_h: u16) -> Self {
        let (cw, ch) = (cell_w.max(1) as usize, cell_h.max(1) as usize);
        let lit = cell_pattern(cw, ch, true);
        let unlit = cell_pattern(cw, ch, false);

        let mut sheet = SpriteSheet::new();
        sheet.load_pixels(CELL_SELECTED, cw, ch, lit.clone());
        sheet.load_pixels(CELL_UNSELECTED, cw, ch, unlit.clone());

        for (idx, name) in COMPOSITE_NAMES.iter().enumerate() {
            let mut pixels = Vec::with_capacity(cw * ch * 4);
            for y in 0..ch * 2 {
                for x in 0..cw * 2 {
                    let bit = (x / cw) + 2 * (y / ch);
                    let cell = if idx & (1 << bit) != 0 { &lit } else { &unlit };
                    pixels.push(cell[(y % ch) * cw + (x % cw)]);
                }
            }
            sheet.load_pixels(name, cw * 2, ch * 2, pixels);
        }

        tracing::info!(count = sheet.len(), "sprite sheet ready");
        sheet
    }
}

fn cell_pattern(w: usize, h: usize, lit: bool) -> Vec<Pixel> {
    let style = if lit {
        Style::default().fg(LCD_INK).bg(LCD_BG).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(LCD_GHOST).bg(LCD_BG)
    };
    let mut row = Vec::with_capacity(w);
    for x in 0..w {
        let ch = match (w, x) {
            (1, _) => '■',
            (_, 0) => '[',
            (_, x) if x == w - 1 => ']',
            _ => '■',
        };
        row.push((ch, style));
    }
    (0..h).flat_map(|_| row.iter().copied()).collect()
}
