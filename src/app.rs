use crate::config::{GameConfig, GridConfig};
use crate::games::menu::Menu;
use crate::games::snake::Snake;
use crate::grid::{Grid, Orientation};
use crate::input::{Button, ButtonSet};
use crate::registry::GameRegistry;
use crate::scores::ScoreBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// The handheld itself: grid, games, scores and the console buttons that
/// act on them before any game sees the input.
pub struct Console {
    grid: Grid,
    target: (usize, usize),
    sizes: GridConfig,
    registry: GameRegistry,
    scores: ScoreBoard,
    orientation: Orientation,
    show_ui: bool,
    frame: u64,
    idle_ticks: u32,
    demo_after: u32,
}

impl Console {
    pub fn new(config: &GameConfig) -> Self {
        let (width, height) = config.grid.classic;
        let mut registry = GameRegistry::new(config.transition_step);
        registry.register(Box::new(Menu::new()));
        registry.register(Box::new(Snake::new(config.timing.snake_move_every)));
        // wipe the menu in on the first frames
        registry.request_switch(0);

        Self {
            grid: Grid::new(width, height),
            target: (width, height),
            sizes: config.grid,
            registry,
            scores: ScoreBoard::new(config.display.score_width),
            orientation: Orientation::Normal,
            show_ui: true,
            frame: 0,
            idle_ticks: 0,
            demo_after: config.timing.demo_after_ticks,
        }
    }

    pub fn tick(&mut self, input: &ButtonSet) -> TickOutcome {
        if input.contains(Button::Plus) {
            tracing::info!(frame = self.frame, "quit requested");
            return TickOutcome::Quit;
        }
        self.frame += 1;
        self.track_idle(input);

        if input.contains(Button::L) {
            self.show_ui = !self.show_ui;
        }
        if input.contains(Button::Y) {
            self.registry.request_switch(0);
        }
        if input.contains(Button::X) {
            self.registry.request_switch(1);
        }
        if input.contains(Button::B) {
            self.target = self.sizes.classic;
        }
        if input.contains(Button::A) {
            self.target = self.sizes.wide;
        }

        if self.grid.step_toward(self.target.0, self.target.1) {
            tracing::trace!(width = self.grid.width(), height = self.grid.height(), "grid resized");
        }
        self.grid.clear();
        self.registry.tick(&mut self.grid, &mut self.scores, input);

        if input.contains(Button::Minus) {
            self.orientation = self.orientation.next();
            tracing::debug!(degrees = self.orientation.degrees(), "orientation");
        }
        TickOutcome::Continue
    }

    fn track_idle(&mut self, input: &ButtonSet) {
        if !input.is_empty() {
            self.idle_ticks = 0;
            self.registry.set_demo(false);
            return;
        }
        self.idle_ticks = self.idle_ticks.saturating_add(1);
        if self.demo_after > 0 && self.idle_ticks >= self.demo_after {
            self.registry.set_demo(true);
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn target(&self) -> (usize, usize) {
        self.target
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn show_ui(&self) -> bool {
        self.show_ui
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(buttons: &[Button]) -> ButtonSet {
        buttons.iter().copied().collect()
    }

    fn idle(console: &mut Console, ticks: usize) {
        let none = ButtonSet::new();
        for _ in 0..ticks {
            assert_eq!(console.tick(&none), TickOutcome::Continue);
        }
    }

    fn started() -> Console {
        let mut console = Console::new(&GameConfig::default());
        idle(&mut console, 136);
        console
    }

    #[test]
    fn menu_wipes_in_at_startup() {
        let mut console = Console::new(&GameConfig::default());
        idle(&mut console, 67);
        assert_eq!(console.registry().current(), None);
        idle(&mut console, 1);
        assert_eq!(console.registry().current_name(), Some("Menu"));
        idle(&mut console, 68);
        assert!(console.registry().transition().is_idle());
    }

    #[test]
    fn plus_quits_before_anything_else() {
        let mut console = started();
        let frame = console.frame();
        let out = console.tick(&press(&[Button::Plus, Button::Minus, Button::L]));
        assert_eq!(out, TickOutcome::Quit);
        assert_eq!(console.frame(), frame);
        assert_eq!(console.orientation(), Orientation::Normal);
        assert!(console.show_ui());
    }

    #[test]
    fn a_widens_one_column_per_tick() {
        let mut console = started();
        console.tick(&press(&[Button::A]));
        assert_eq!(console.target(), (20, 20));
        assert_eq!((console.grid().width(), console.grid().height()), (11, 20));
        idle(&mut console, 9);
        assert_eq!(console.grid().width(), 20);
        idle(&mut console, 5);
        assert_eq!(console.grid().width(), 20);

        console.tick(&press(&[Button::B]));
        assert_eq!(console.grid().width(), 19);
    }

    #[test]
    fn switch_requests_during_a_wipe_are_dropped() {
        let mut console = Console::new(&GameConfig::default());
        idle(&mut console, 1);
        console.tick(&press(&[Button::X]));
        idle(&mut console, 200);
        assert_eq!(console.registry().current_name(), Some("Menu"));
        assert_eq!(console.registry().next(), None);
    }

    #[test]
    fn l_and_minus_toggle_view_state() {
        let mut console = started();
        console.tick(&press(&[Button::L]));
        assert!(!console.show_ui());
        console.tick(&press(&[Button::L]));
        assert!(console.show_ui());

        for expected in [Orientation::LeftDown, Orientation::UpsideDown, Orientation::RightDown, Orientation::Normal] {
            console.tick(&press(&[Button::Minus]));
            assert_eq!(console.orientation(), expected);
        }
    }

    #[test]
    fn x_switches_to_snake() {
        let mut console = started();
        console.tick(&press(&[Button::X]));
        assert_eq!(console.registry().next(), Some(1));
        idle(&mut console, 136);
        assert_eq!(console.registry().current_name(), Some("Snake"));
        assert_eq!(console.scores().score_display(), "       0");
        // snake body and food are on the grid
        assert!(console.grid().lit_count() >= 4);

        console.tick(&press(&[Button::Y]));
        idle(&mut console, 136);
        assert_eq!(console.registry().current_name(), Some("Menu"));
    }

    #[test]
    fn idle_console_falls_into_demo() {
        let mut config = GameConfig::default();
        config.timing.demo_after_ticks = 140;
        let mut console = Console::new(&config);
        idle(&mut console, 139);
        assert!(!console.registry().is_demo());
        idle(&mut console, 1);
        assert!(console.registry().is_demo());
        console.tick(&press(&[Button::Left]));
        assert!(!console.registry().is_demo());
    }
}
