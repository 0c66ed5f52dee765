//! Registered games and the machine that switches between them.
//!
//! A switch request only records the target. The next tick starts the wipe;
//! when the screen is fully covered the old game exits, the new one inits,
//! and the wipe opens on it. Only one game is ever current.

use crate::games::{GameContext, MiniGame};
use crate::grid::Grid;
use crate::input::ButtonSet;
use crate::objects::ObjectArena;
use crate::scores::ScoreBoard;
use crate::transition::Transition;

pub struct GameRegistry {
    games: Vec<Box<dyn MiniGame>>,
    current: Option<usize>,
    next: Option<usize>,
    transition: Transition,
    objects: ObjectArena,
    demo: bool,
}

impl GameRegistry {
    pub fn new(transition_step: f64) -> Self {
        Self {
            games: Vec::new(),
            current: None,
            next: None,
            transition: Transition::new(transition_step),
            objects: ObjectArena::new(),
            demo: false,
        }
    }

    pub fn register(&mut self, game: Box<dyn MiniGame>) -> usize {
        self.games.push(game);
        self.games.len() - 1
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.games.get(index).map(|g| g.name())
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.and_then(|i| self.name(i))
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn objects(&self) -> &ObjectArena {
        &self.objects
    }

    /// In demo mode the current game plays itself instead of reading input.
    pub fn set_demo(&mut self, on: bool) {
        if self.demo != on {
            tracing::info!(demo = on, "demo mode");
            self.demo = on;
        }
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    /// Ask to switch to `index`. Dropped while a wipe is running, when the
    /// target is already current, or when no such game exists.
    pub fn request_switch(&mut self, index: usize) -> bool {
        if index >= self.games.len() {
            tracing::debug!(index, "switch request to unknown game ignored");
            return false;
        }
        if Some(index) == self.current || !self.transition.is_idle() {
            tracing::debug!(index, "switch request ignored");
            return false;
        }
        self.next = Some(index);
        true
    }

    /// One frame: start or advance the wipe, swap games at its midpoint,
    /// then step (when no wipe is running) and draw the current game.
    pub fn tick(&mut self, grid: &mut Grid, scores: &mut ScoreBoard, input: &ButtonSet) {
        if self.next.is_some() && self.next != self.current && self.transition.is_idle() {
            self.transition.start();
        }

        if !self.transition.is_idle() {
            if self.transition.advance() {
                self.swap(grid, scores, input);
            }
            self.transition.apply(grid);
        }

        let Some(current) = self.current else { return };
        let game_count = self.games.len();
        let idle = self.transition.is_idle();
        let game = &mut self.games[current];
        let mut ctx = GameContext {
            grid,
            scores,
            objects: &mut self.objects,
            input,
            game_count,
            switch_to: None,
        };

        if idle {
            ctx.objects.step_all();
            if self.demo {
                game.demo(&mut ctx);
            } else {
                game.step(&mut ctx);
            }
        }
        ctx.objects.draw_all(ctx.grid);
        game.draw(&mut ctx);

        let requested = ctx.switch_to;
        if let Some(target) = requested {
            self.request_switch(target);
        }
    }

    fn swap(&mut self, grid: &mut Grid, scores: &mut ScoreBoard, input: &ButtonSet) {
        let game_count = self.games.len();
        let Some(next) = self.next.take() else { return };

        if let Some(old) = self.current {
            self.objects.clear();
            let mut ctx = GameContext {
                grid: &mut *grid,
                scores: &mut *scores,
                objects: &mut self.objects,
                input,
                game_count,
                switch_to: None,
            };
            self.games[old].exit(&mut ctx);
            tracing::info!(
                game = self.games[old].name(),
                score = ctx.scores.score(),
                highscore = ctx.scores.highscore(),
                "exited"
            );
        }

        self.current = Some(next);
        let mut ctx = GameContext {
            grid,
            scores,
            objects: &mut self.objects,
            input,
            game_count,
            switch_to: None,
        };
        self.games[next].init(&mut ctx);
        tracing::info!(game = self.games[next].name(), "started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::GameObject;
    use crate::transition::Stage;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        log: Vec<String>,
    }

    struct Probe {
        name: &'static str,
        calls: Rc<RefCell<Calls>>,
        request: Option<usize>,
    }

    impl Probe {
        fn boxed(name: &'static str, calls: &Rc<RefCell<Calls>>) -> Box<dyn MiniGame> {
            Box::new(Probe { name, calls: calls.clone(), request: None })
        }

        fn push(&self, what: &str) {
            self.calls.borrow_mut().log.push(format!("{}:{}", self.name, what));
        }
    }

    struct Marker;

    impl GameObject for Marker {
        fn step(&mut self) {}
        fn draw(&self, grid: &mut Grid) {
            grid.set(0, 0, true);
        }
        fn is_alive(&self) -> bool {
            true
        }
    }

    impl MiniGame for Probe {
        fn name(&self) -> &str {
            self.name
        }
        fn init(&mut self, ctx: &mut GameContext) {
            self.push("init");
            ctx.objects.spawn(Box::new(Marker));
        }
        fn step(&mut self, ctx: &mut GameContext) {
            self.push("step");
            ctx.switch_to = self.request.take();
        }
        fn draw(&mut self, _ctx: &mut GameContext) {
            self.push("draw");
        }
        fn exit(&mut self, _ctx: &mut GameContext) {
            self.push("exit");
        }
        fn demo(&mut self, _ctx: &mut GameContext) {
            self.push("demo");
        }
    }

    struct Rig {
        registry: GameRegistry,
        grid: Grid,
        scores: ScoreBoard,
        input: ButtonSet,
        calls: Rc<RefCell<Calls>>,
    }

    impl Rig {
        fn new() -> Self {
            let calls = Rc::new(RefCell::new(Calls::default()));
            let mut registry = GameRegistry::new(1.5);
            registry.register(Probe::boxed("menu", &calls));
            registry.register(Probe::boxed("snake", &calls));
            Self {
                registry,
                grid: Grid::new(10, 20),
                scores: ScoreBoard::default(),
                input: ButtonSet::new(),
                calls,
            }
        }

        fn tick(&mut self) {
            self.grid.clear();
            self.registry.tick(&mut self.grid, &mut self.scores, &self.input);
        }

        fn run_until_idle(&mut self) -> usize {
            let mut frames = 0;
            loop {
                self.tick();
                frames += 1;
                if self.registry.transition().is_idle() {
                    return frames;
                }
                assert!(frames < 1000, "transition never finished");
            }
        }

        fn count(&self, entry: &str) -> usize {
            self.calls.borrow().log.iter().filter(|e| *e == entry).count()
        }

        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut self.calls.borrow_mut().log)
        }
    }

    #[test]
    fn nothing_happens_without_a_request() {
        let mut rig = Rig::new();
        rig.tick();
        assert_eq!(rig.registry.current(), None);
        assert!(rig.registry.transition().is_idle());
        assert!(rig.take_log().is_empty());
        assert_eq!(rig.grid.lit_count(), 0);
    }

    #[test]
    fn switch_happens_once_at_the_wipe_midpoint() {
        let mut rig = Rig::new();
        assert!(rig.registry.request_switch(0));
        let mut frames = 0;
        while rig.registry.current().is_none() {
            rig.tick();
            frames += 1;
            assert!(frames < 200);
            if rig.registry.current().is_none() {
                assert_eq!(rig.registry.transition().stage(), Stage::Closing);
            }
        }
        assert_eq!(frames, 68);
        assert!(rig.registry.transition().percent() >= 100.0);
        assert_eq!(rig.registry.transition().stage(), Stage::Opening);
        assert_eq!(rig.registry.next(), None);
        assert_eq!(rig.count("menu:init"), 1);
        // the frame of the swap draws the new game but does not step it
        assert_eq!(rig.take_log(), vec!["menu:init", "menu:draw"]);
    }

    #[test]
    fn exit_then_init_once_per_switch() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        rig.run_until_idle();
        rig.take_log();

        assert!(rig.registry.request_switch(1));
        rig.run_until_idle();
        assert_eq!(rig.registry.current(), Some(1));
        let log = rig.take_log();
        let lifecycle: Vec<_> = log.iter().filter(|e| e.ends_with("exit") || e.ends_with("init")).collect();
        assert_eq!(lifecycle, vec!["menu:exit", "snake:init"]);
        // after the swap only the new game is called
        let swap = log.iter().position(|e| e == "snake:init").unwrap();
        assert!(log[swap..].iter().all(|e| e.starts_with("snake:")));
        assert!(log[..swap].iter().all(|e| e.starts_with("menu:")));
    }

    #[test]
    fn requests_during_a_wipe_are_dropped() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        rig.tick();
        assert!(!rig.registry.transition().is_idle());
        assert!(!rig.registry.request_switch(1));
        assert_eq!(rig.registry.next(), Some(0));
        rig.run_until_idle();
        assert_eq!(rig.registry.current(), Some(0));
        assert_eq!(rig.registry.next(), None);
    }

    #[test]
    fn requests_for_current_or_unknown_games_are_ignored() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        rig.run_until_idle();
        assert!(!rig.registry.request_switch(0));
        assert!(!rig.registry.request_switch(7));
        assert_eq!(rig.registry.next(), None);
    }

    #[test]
    fn idle_frames_step_then_draw() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        rig.run_until_idle();
        rig.take_log();
        rig.tick();
        rig.tick();
        assert_eq!(rig.take_log(), vec!["menu:step", "menu:draw", "menu:step", "menu:draw"]);
    }

    #[test]
    fn demo_mode_replaces_step() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        rig.run_until_idle();
        rig.take_log();
        rig.registry.set_demo(true);
        rig.tick();
        rig.registry.set_demo(false);
        rig.tick();
        assert_eq!(rig.take_log(), vec!["menu:demo", "menu:draw", "menu:step", "menu:draw"]);
    }

    #[test]
    fn games_can_request_switches() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        rig.run_until_idle();
        rig.registry.games[0] = {
            let mut p = Probe { name: "menu", calls: rig.calls.clone(), request: None };
            p.request = Some(1);
            Box::new(p)
        };
        rig.tick();
        assert_eq!(rig.registry.next(), Some(1));
        rig.run_until_idle();
        assert_eq!(rig.registry.current_name(), Some("snake"));
    }

    #[test]
    fn objects_are_cleared_when_a_game_exits() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        rig.run_until_idle();
        assert_eq!(rig.registry.objects().len(), 1);
        rig.tick();
        assert!(rig.grid.get(0, 0));

        rig.registry.request_switch(1);
        rig.run_until_idle();
        // only the marker spawned by the new game's init remains
        assert_eq!(rig.registry.objects().len(), 1);
        assert_eq!(rig.count("snake:init"), 1);
    }

    #[test]
    fn wipe_covers_the_grid_during_closing() {
        let mut rig = Rig::new();
        rig.registry.request_switch(0);
        for _ in 0..34 {
            rig.tick();
        }
        // 34 * 1.5 = 51 percent of 20 rows
        assert_eq!(rig.grid.lit_count(), 11 * 10);
    }
}
