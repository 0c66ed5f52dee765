pub mod menu;
pub mod snake;

use crate::grid::Grid;
use crate::input::ButtonSet;
use crate::objects::ObjectArena;
use crate::scores::ScoreBoard;

/// Everything a game may touch during one call.
pub struct GameContext<'a> {
    pub grid: &'a mut Grid,
    pub scores: &'a mut ScoreBoard,
    pub objects: &'a mut ObjectArena,
    pub input: &'a ButtonSet,
    pub game_count: usize,
    /// Set by a game to ask the console to switch to another game.
    pub switch_to: Option<usize>,
}

pub trait MiniGame {
    fn name(&self) -> &str;
    fn init(&mut self, ctx: &mut GameContext);
    fn step(&mut self, ctx: &mut GameContext);
    fn draw(&mut self, ctx: &mut GameContext);
    fn exit(&mut self, ctx: &mut GameContext);
    /// Run one frame with the game playing itself.
    fn demo(&mut self, ctx: &mut GameContext);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Owns everything a `GameContext` borrows.
    pub struct Harness {
        pub grid: Grid,
        pub scores: ScoreBoard,
        pub objects: ObjectArena,
        pub input: ButtonSet,
        pub game_count: usize,
    }

    impl Harness {
        pub fn new(width: usize, height: usize) -> Self {
            Self {
                grid: Grid::new(width, height),
                scores: ScoreBoard::default(),
                objects: ObjectArena::new(),
                input: ButtonSet::new(),
                game_count: 2,
            }
        }

        /// Run `f` with a fresh context and return the switch it requested.
        pub fn with<F: FnOnce(&mut GameContext)>(&mut self, f: F) -> Option<usize> {
            let mut ctx = GameContext {
                grid: &mut self.grid,
                scores: &mut self.scores,
                objects: &mut self.objects,
                input: &self.input,
                game_count: self.game_count,
                switch_to: None,
            };
            f(&mut ctx);
            ctx.switch_to
        }
    }
}
