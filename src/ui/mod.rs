pub mod canvas;
pub mod display;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::Console;
use crate::glyph::{compose, CellLayout};
use crate::grid::Grid;
use crate::input::{Button, KeyMap};
use crate::perf::FrameMeter;
use crate::sprites::{SpriteSheet, LCD_BG, LCD_INK};
use canvas::{Canvas, SpritePainter};

const BACKDROP: Color = Color::Rgb(20, 22, 18);
const KEY_COLOR: Color = Color::Rgb(80, 200, 255);
const DIM: Color = Color::Rgb(100, 100, 130);
const TEXT: Color = Color::Rgb(180, 180, 200);

/// Per-frame rendering inputs that live outside the console.
pub struct Screen<'a> {
    pub sheet: &'a SpriteSheet,
    pub keys: &'a KeyMap,
    pub meter: &'a FrameMeter,
    pub cell_width: u16,
    pub cell_height: u16,
}

pub fn render(frame: &mut Frame, console: &Console, screen: &Screen) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BACKDROP)), area);

    let grid = console.grid().rotated(console.orientation());
    let board_w = span(grid.width(), screen.cell_width).saturating_add(2);

    if !console.show_ui() {
        render_board(frame, area, &grid, screen);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(26),         // Help
            Constraint::Length(board_w), // Board
            Constraint::Min(36),         // Scores
        ])
        .split(area);

    render_help(frame, cols[0], console, screen);
    render_board(frame, cols[1], &grid, screen);
    render_scores(frame, cols[2], console);
}

/// Terminal columns (or rows) covered by `count` cells of `size` each.
fn span(count: usize, size: u16) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX).saturating_mul(size)
}

pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_board(frame: &mut Frame, area: Rect, grid: &Grid, screen: &Screen) {
    let canvas_w = span(grid.width(), screen.cell_width);
    let canvas_h = span(grid.height(), screen.cell_height);
    let rect = centered(area, canvas_w.saturating_add(2), canvas_h.saturating_add(2));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(LCD_INK))
        .style(Style::default().bg(LCD_BG));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut canvas = Canvas::new(canvas_w, canvas_h, (' ', Style::default().bg(LCD_BG)));
    let layout = CellLayout::new(screen.cell_width as i32, screen.cell_height as i32);
    let stats = compose(grid, layout, &mut SpritePainter { canvas: &mut canvas, sheet: screen.sheet });
    tracing::trace!(draws = stats.total(), failed = stats.failed, "board composed");

    frame.render_widget(Paragraph::new(canvas.into_lines()), inner);
}

fn render_scores(frame: &mut Frame, area: Rect, console: &Console) {
    let scores = console.scores();
    let chars = scores
        .width()
        .max(scores.score_display().chars().count())
        .max(scores.highscore_display().chars().count());
    let width = span(chars, 4).saturating_add(2);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    display::render_display(frame, centered(rows[1], width, 5), "SCORE", scores.score_display());
    display::render_display(frame, centered(rows[2], width, 5), "HI-SCORE", scores.highscore_display());
}

fn render_help(frame: &mut Frame, area: Rect, console: &Console, screen: &Screen) {
    let registry = console.registry();
    let game_name = |i: usize| registry.name(i).unwrap_or("-").to_string();

    let controls: Vec<(Button, String)> = vec![
        (Button::Plus, "quit".into()),
        (Button::L, "hide panels".into()),
        (Button::Y, game_name(0)),
        (Button::X, game_name(1)),
        (Button::B, "classic grid".into()),
        (Button::A, "wide grid".into()),
        (Button::Minus, "rotate".into()),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "BRICK GAME",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (button, what) in controls {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>6} ", screen.keys.label(button)),
                Style::default().fg(KEY_COLOR).add_modifier(Modifier::BOLD),
            ),
            Span::styled(what, Style::default().fg(TEXT)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:>6} ", "arrows"),
            Style::default().fg(KEY_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::styled("play", Style::default().fg(TEXT)),
    ]));

    lines.push(Line::from(""));
    for i in 0..registry.len() {
        let current = registry.current() == Some(i);
        let marker = if current { "▶ " } else { "  " };
        let style = if current {
            Style::default().fg(Color::Rgb(255, 255, 255)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        lines.push(Line::from(Span::styled(format!("{marker}{}", game_name(i)), style)));
    }

    // Debug lines
    let grid = console.grid();
    let (target_w, target_h) = console.target();
    let transition = registry.transition();
    let next = registry.next().map(game_name).unwrap_or_default();
    let debug = [
        format!(
            "#{} {:.2} ms {:>3.0} fps",
            console.frame(),
            screen.meter.average_ms(),
            screen.meter.fps(),
        ),
        format!(
            "{}x{} -> {}x{}  {}°",
            grid.width(),
            grid.height(),
            target_w,
            target_h,
            console.orientation().degrees(),
        ),
        format!(
            "{} {}  {:?} {:.1}%",
            registry.current_name().unwrap_or("-"),
            next,
            transition.stage(),
            transition.percent(),
        ),
        format!(
            "objects {}{}",
            registry.objects().len(),
            if registry.is_demo() { "  demo" } else { "" },
        ),
    ];
    lines.push(Line::from(""));
    for text in debug {
        lines.push(Line::from(Span::styled(text, Style::default().fg(DIM))));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(DIM));
    let p = Paragraph::new(lines).block(block);
    frame.render_widget(p, area);
}
