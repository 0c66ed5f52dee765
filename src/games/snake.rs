use std::collections::VecDeque;

use rand::Rng;

use crate::games::{GameContext, MiniGame};
use crate::grid::Grid;
use crate::input::Button;
use crate::objects::GameObject;

const START_LEN: i32 = 3;
const FOOD_POINTS: i64 = 10;
const DEATH_FLASH_TICKS: u32 = 60;
const SPARKLE_TICKS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Brief plus-shaped flash where food was eaten.
struct Sparkle {
    x: i32,
    y: i32,
    ttl: u32,
}

impl GameObject for Sparkle {
    fn step(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
    }

    fn draw(&self, grid: &mut Grid) {
        if self.ttl % 4 < 2 {
            return;
        }
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            grid.set(self.x + dx, self.y + dy, true);
        }
    }

    fn is_alive(&self) -> bool {
        self.ttl > 0
    }
}

pub struct Snake {
    // head first
    body: VecDeque<(i32, i32)>,
    dir: Dir,
    queued: Dir,
    food: Option<(i32, i32)>,
    eaten: u32,
    move_every: u32,
    tick: u32,
    dead_timer: u32,
}

impl Snake {
    pub fn new(move_every: u32) -> Self {
        Self {
            body: VecDeque::new(),
            dir: Dir::Up,
            queued: Dir::Up,
            food: None,
            eaten: 0,
            move_every: move_every.max(1),
            tick: 0,
            dead_timer: 0,
        }
    }

    fn reset(&mut self, ctx: &mut GameContext) {
        let (w, h) = (ctx.grid.width() as i32, ctx.grid.height() as i32);
        self.body.clear();
        for i in 0..START_LEN {
            self.body.push_back((w / 2, h / 2 + i));
        }
        self.dir = Dir::Up;
        self.queued = Dir::Up;
        self.eaten = 0;
        self.tick = 0;
        self.dead_timer = 0;
        self.food = self.place_food(ctx.grid);
        ctx.scores.set_score(0);
    }

    fn place_food(&self, grid: &Grid) -> Option<(i32, i32)> {
        let free: Vec<(i32, i32)> = (0..grid.height() as i32)
            .flat_map(|y| (0..grid.width() as i32).map(move |x| (x, y)))
            .filter(|p| !self.body.contains(p))
            .collect();
        if free.is_empty() {
            return None;
        }
        let mut rng = rand::thread_rng();
        Some(free[rng.gen_range(0..free.len())])
    }

    fn turn(&mut self, dir: Dir) {
        if dir != self.dir.opposite() {
            self.queued = dir;
        }
    }

    fn read_input(&mut self, ctx: &GameContext) {
        for (button, dir) in [
            (Button::Up, Dir::Up),
            (Button::Down, Dir::Down),
            (Button::Left, Dir::Left),
            (Button::Right, Dir::Right),
        ] {
            if ctx.input.contains(button) {
                self.turn(dir);
            }
        }
    }

    fn next_head(&self, dir: Dir, grid: &Grid) -> Option<(i32, i32)> {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        if w == 0 || h == 0 {
            return None;
        }
        let &(hx, hy) = self.body.front()?;
        let (dx, dy) = dir.delta();
        Some(((hx + dx).rem_euclid(w), (hy + dy).rem_euclid(h)))
    }

    /// Count down the death flash. Returns true while it is still running.
    fn tick_death(&mut self, ctx: &mut GameContext) -> bool {
        if self.dead_timer == 0 {
            return false;
        }
        self.dead_timer -= 1;
        if self.dead_timer == 0 {
            self.reset(ctx);
        }
        true
    }

    fn advance(&mut self, ctx: &mut GameContext) {
        self.tick += 1;
        if self.tick % self.move_every != 0 {
            return;
        }
        self.dir = self.queued;
        let Some(head) = self.next_head(self.dir, ctx.grid) else { return };

        let eating = self.food == Some(head);
        let tail = if eating { None } else { self.body.pop_back() };
        if self.body.contains(&head) {
            if let Some(t) = tail {
                self.body.push_back(t);
            }
            self.dead_timer = DEATH_FLASH_TICKS;
            tracing::info!(length = self.body.len(), eaten = self.eaten, "snake crashed");
            return;
        }
        self.body.push_front(head);

        if eating {
            self.eaten += 1;
            ctx.scores.increment_score(FOOD_POINTS);
            ctx.objects.spawn(Box::new(Sparkle { x: head.0, y: head.1, ttl: SPARKLE_TICKS }));
            self.food = self.place_food(ctx.grid);
        } else if self.food.map_or(true, |(fx, fy)| !ctx.grid.contains(fx, fy)) {
            // the grid was resized under us
            self.food = self.place_food(ctx.grid);
        }
    }

    /// Autopilot: head for the food, avoiding reversal and the body.
    fn pick_demo_dir(&self, grid: &Grid) -> Dir {
        let Some(&(hx, hy)) = self.body.front() else { return self.dir };
        let mut options = vec![];
        if let Some((fx, fy)) = self.food {
            if fx < hx { options.push(Dir::Left) }
            if fx > hx { options.push(Dir::Right) }
            if fy < hy { options.push(Dir::Up) }
            if fy > hy { options.push(Dir::Down) }
        }
        options.extend([self.dir, Dir::Up, Dir::Right, Dir::Down, Dir::Left]);

        let tail = self.body.back().copied();
        options
            .into_iter()
            .filter(|d| *d != self.dir.opposite())
            .find(|d| match self.next_head(*d, grid) {
                Some(p) => !self.body.contains(&p) || Some(p) == tail,
                None => false,
            })
            .unwrap_or(self.dir)
    }
}

impl MiniGame for Snake {
    fn name(&self) -> &str {
        "Snake"
    }

    fn init(&mut self, ctx: &mut GameContext) {
        self.reset(ctx);
    }

    fn step(&mut self, ctx: &mut GameContext) {
        if self.tick_death(ctx) {
            return;
        }
        self.read_input(ctx);
        self.advance(ctx);
    }

    fn draw(&mut self, ctx: &mut GameContext) {
        if let Some((fx, fy)) = self.food {
            ctx.grid.set(fx, fy, true);
        }
        // body blinks while the crash flash runs
        if self.dead_timer > 0 && (self.dead_timer / 8) % 2 == 1 {
            return;
        }
        for &(x, y) in &self.body {
            ctx.grid.set(x, y, true);
        }
    }

    fn exit(&mut self, _ctx: &mut GameContext) {
        self.body.clear();
        self.food = None;
        self.dead_timer = 0;
    }

    fn demo(&mut self, ctx: &mut GameContext) {
        if self.body.is_empty() {
            self.reset(ctx);
        }
        if self.tick_death(ctx) {
            return;
        }
        let dir = self.pick_demo_dir(ctx.grid);
        self.turn(dir);
        self.advance(ctx);
    }
}
