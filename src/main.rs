mod app;
mod config;
mod event;
mod games;
mod glyph;
mod grid;
mod input;
mod logging;
mod objects;
mod perf;
mod registry;
mod scores;
mod sprites;
mod transition;
mod ui;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use app::{Console, TickOutcome};
use config::GameConfig;
use event::{Event, EventHandler};
use input::{Button, ButtonSet};
use perf::FrameMeter;
use sprites::SpriteSheet;
use ui::Screen;

fn main() -> Result<()> {
    let (config, warnings) = GameConfig::load();
    let _log_guard = logging::init_logging(&config.log);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        classic = ?config.grid.classic,
        wide = ?config.grid.wide,
        step = config.transition_step,
        "brickgame starting"
    );
    for button in Button::all() {
        tracing::debug!(button = button.label(), key = config.keys.label(*button), "binding");
    }

    let sheet = SpriteSheet::brick_console(config.display.cell_width, config.display.cell_height);

    // Setup terminal
    install_panic_hook();
    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
    terminal.clear()?;

    let result = run(&mut terminal, &config, &sheet);

    // Restore terminal
    drop(guard);

    match &result {
        Ok(()) => tracing::info!("brickgame stopped"),
        Err(err) => tracing::error!("brickgame failed: {err:#}"),
    }
    result
}

/// Raw mode plus the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = leave_screen(&mut io::stdout());
}

fn leave_screen<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// Put the terminal back before the panic message is printed.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        tracing::error!("panic: {info}");
        default_hook(info);
    }));
}

fn run<B: Backend>(terminal: &mut Terminal<B>, config: &GameConfig, sheet: &SpriteSheet) -> Result<()> {
    let mut console = Console::new(config);
    let mut meter = FrameMeter::new();
    let events = EventHandler::new(config.timing.tick_rate_ms);
    let mut pressed = ButtonSet::new();
    let mut last_tick = Instant::now();

    loop {
        match events.next().context("event channel closed")? {
            Event::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    tracing::info!("interrupted");
                    return Ok(());
                }
                if let Some(button) = config.keys.lookup(key.code) {
                    pressed.insert(button);
                }
            }
            Event::Tick => {
                let now = Instant::now();
                meter.record(now - last_tick);
                last_tick = now;

                let outcome = console.tick(&pressed);
                pressed.clear();
                if outcome == TickOutcome::Quit {
                    return Ok(());
                }

                let screen = Screen {
                    sheet,
                    keys: &config.keys,
                    meter: &meter,
                    cell_width: config.display.cell_width,
                    cell_height: config.display.cell_height,
                };
                terminal
                    .draw(|frame| ui::render(frame, &console, &screen))
                    .context("failed to draw frame")?;
            }
        }
    }
}
