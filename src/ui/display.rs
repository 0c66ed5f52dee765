//! 7-segment score readout. Every position shows all seven segments, unlit
//! ones in the ghost colour, like the real LCD.

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::sprites::{LCD_BG, LCD_GHOST, LCD_INK};

// Segment bits: a top, b upper right, c lower right, d bottom,
// e lower left, f upper left, g middle.
const A: u8 = 1 << 0;
const B: u8 = 1 << 1;
const C: u8 = 1 << 2;
const D: u8 = 1 << 3;
const E: u8 = 1 << 4;
const F: u8 = 1 << 5;
const G: u8 = 1 << 6;

fn segments(ch: char) -> u8 {
    match ch {
        '0' => A | B | C | D | E | F,
        '1' => B | C,
        '2' => A | B | G | E | D,
        '3' => A | B | G | C | D,
        '4' => F | G | B | C,
        '5' => A | F | G | C | D,
        '6' => A | F | G | E | C | D,
        '7' => A | B | C,
        '8' => A | B | C | D | E | F | G,
        '9' => A | B | C | D | F | G,
        '-' => G,
        _ => 0,
    }
}

/// Three rows of text for `text`, four columns per character.
pub fn seven_segment(text: &str) -> Vec<Line<'static>> {
    let on = Style::default().fg(LCD_INK).bg(LCD_BG).add_modifier(Modifier::BOLD);
    let off = Style::default().fg(LCD_GHOST).bg(LCD_BG);
    let seg = |mask: u8, bit: u8, glyph: char| -> Span<'static> {
        Span::styled(String::from(glyph), if mask & bit != 0 { on } else { off })
    };
    let gap = || Span::styled(" ", off);

    let mut rows: [Vec<Span<'static>>; 3] = [vec![], vec![], vec![]];
    for ch in text.chars() {
        let mask = segments(ch);
        rows[0].extend([gap(), seg(mask, A, '_'), gap(), gap()]);
        rows[1].extend([seg(mask, F, '|'), seg(mask, G, '_'), seg(mask, B, '|'), gap()]);
        rows[2].extend([seg(mask, E, '|'), seg(mask, D, '_'), seg(mask, C, '|'), gap()]);
    }
    rows.into_iter().map(Line::from).collect()
}

pub fn render_display(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 66, 50)))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(LCD_INK).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(LCD_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let p = Paragraph::new(seven_segment(text)).alignment(Alignment::Right);
    frame.render_widget(p, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(line: &Line) -> String {
        line.spans.iter().map(|s| &*s.content).collect()
    }

    #[test]
    fn three_rows_four_columns_per_char() {
        let lines = seven_segment("      42");
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(row_text(line).chars().count(), 32);
        }
    }

    #[test]
    fn blank_positions_are_ghost_eights() {
        let lines = seven_segment(" ");
        assert_eq!(row_text(&lines[1]), "|_| ");
        assert!(lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .all(|s| s.style.fg == Some(LCD_GHOST)));
    }

    #[test]
    fn digit_one_lights_the_right_side() {
        let lines = seven_segment("1");
        let lit: Vec<(usize, usize)> = lines
            .iter()
            .enumerate()
            .flat_map(|(row, l)| {
                l.spans
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.style.fg == Some(LCD_INK))
                    .map(move |(col, _)| (row, col))
            })
            .collect();
        assert_eq!(lit, vec![(1, 2), (2, 2)]);
    }
}
