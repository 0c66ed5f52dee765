//! Short-lived entities that belong to the running game session.
//!
//! Games spawn effects here instead of tracking them themselves. The whole
//! arena is dropped when the game exits, so nothing outlives its game.

use crate::grid::Grid;

pub trait GameObject {
    fn step(&mut self);
    fn draw(&self, grid: &mut Grid);
    fn is_alive(&self) -> bool;
}

#[derive(Default)]
pub struct ObjectArena {
    objects: Vec<Box<dyn GameObject>>,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, object: Box<dyn GameObject>) {
        self.objects.push(object);
    }

    pub fn step_all(&mut self) {
        for object in self.objects.iter_mut() {
            object.step();
        }
        self.objects.retain(|o| o.is_alive());
    }

    pub fn draw_all(&self, grid: &mut Grid) {
        for object in &self.objects {
            object.draw(grid);
        }
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dot {
        x: i32,
        ttl: u32,
    }

    impl GameObject for Dot {
        fn step(&mut self) {
            self.ttl = self.ttl.saturating_sub(1);
        }

        fn draw(&self, grid: &mut Grid) {
            grid.set(self.x, 0, true);
        }

        fn is_alive(&self) -> bool {
            self.ttl > 0
        }
    }

    #[test]
    fn dead_objects_are_dropped_after_step() {
        let mut arena = ObjectArena::new();
        arena.spawn(Box::new(Dot { x: 0, ttl: 1 }));
        arena.spawn(Box::new(Dot { x: 1, ttl: 3 }));
        arena.step_all();
        assert_eq!(arena.len(), 1);

        let mut grid = Grid::new(2, 1);
        arena.draw_all(&mut grid);
        assert!(!grid.get(0, 0));
        assert!(grid.get(1, 0));
    }

    #[test]
    fn clear_empties_the_arena() {
        let mut arena = ObjectArena::new();
        arena.spawn(Box::new(Dot { x: 0, ttl: 5 }));
        arena.clear();
        assert_eq!(arena.len(), 0);
    }
}
