use crate::games::{GameContext, MiniGame};
use crate::grid::Grid;
use crate::input::Button;

const BLINK_FRAMES: u32 = 15;
const DEMO_INTERVAL: u32 = 90;

// 3x5 pixel numerals
const DIGITS: [[&str; 5]; 10] = [
    ["###", "#.#", "#.#", "#.#", "###"],
    [".#.", "##.", ".#.", ".#.", "###"],
    ["###", "..#", "###", "#..", "###"],
    ["###", "..#", ".##", "..#", "###"],
    ["#.#", "#.#", "###", "..#", "..#"],
    ["###", "#..", "###", "..#", "###"],
    ["###", "#..", "###", "#.#", "###"],
    ["###", "..#", ".#.", ".#.", ".#."],
    ["###", "#.#", "###", "#.#", "###"],
    ["###", "#.#", "###", "..#", "###"],
];

fn draw_digit(grid: &mut Grid, digit: usize, x0: i32, y0: i32) {
    for (dy, row) in DIGITS[digit % 10].iter().enumerate() {
        for (dx, ch) in row.chars().enumerate() {
            if ch == '#' {
                grid.set(x0 + dx as i32, y0 + dy as i32, true);
            }
        }
    }
}

/// Draw `n` centered horizontally with its top at `y0`. Returns the left
/// and right edge columns.
fn draw_number(grid: &mut Grid, n: usize, y0: i32) -> (i32, i32) {
    let digits: Vec<usize> = n
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();
    let total = digits.len() as i32 * 4 - 1;
    let x0 = (grid.width() as i32 - total) / 2;
    for (i, d) in digits.iter().enumerate() {
        draw_digit(grid, *d, x0 + i as i32 * 4, y0);
    }
    (x0, x0 + total - 1)
}

fn draw_border(grid: &mut Grid) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    for x in 0..w {
        grid.set(x, 0, true);
        grid.set(x, h - 1, true);
    }
    for y in 0..h {
        grid.set(0, y, true);
        grid.set(w - 1, y, true);
    }
}

/// Game picker. Entry 0 is the menu itself, so selection runs over 1..count.
pub struct Menu {
    selected: usize,
    frame: u32,
}

impl Menu {
    pub fn new() -> Self {
        Self { selected: 1, frame: 0 }
    }

    fn cycle(&mut self, game_count: usize, forward: bool) {
        if game_count <= 2 {
            return;
        }
        let choices = game_count - 1;
        let pos = self.selected.saturating_sub(1) % choices;
        let pos = if forward { (pos + 1) % choices } else { (pos + choices - 1) % choices };
        self.selected = pos + 1;
    }
}

impl MiniGame for Menu {
    fn name(&self) -> &str {
        "Menu"
    }

    fn init(&mut self, ctx: &mut GameContext) {
        self.frame = 0;
        if self.selected == 0 || self.selected >= ctx.game_count {
            self.selected = 1;
        }
        ctx.scores.set_score("");
    }

    fn step(&mut self, ctx: &mut GameContext) {
        self.frame = self.frame.wrapping_add(1);
        if ctx.input.contains(Button::Left) {
            self.cycle(ctx.game_count, false);
        }
        if ctx.input.contains(Button::Right) {
            self.cycle(ctx.game_count, true);
        }
        if (ctx.input.contains(Button::Up) || ctx.input.contains(Button::R))
            && self.selected < ctx.game_count
        {
            ctx.switch_to = Some(self.selected);
        }
    }

    fn draw(&mut self, ctx: &mut GameContext) {
        let grid = &mut *ctx.grid;
        draw_border(grid);
        if ctx.game_count < 2 {
            return;
        }

        let y0 = (grid.height() as i32 - 5) / 2;
        let (left, right) = draw_number(grid, self.selected, y0);

        if (self.frame / BLINK_FRAMES) % 2 == 0 {
            // < and > beside the numeral
            grid.set(left - 3, y0 + 2, true);
            grid.set(left - 2, y0 + 1, true);
            grid.set(left - 2, y0 + 3, true);
            grid.set(right + 3, y0 + 2, true);
            grid.set(right + 2, y0 + 1, true);
            grid.set(right + 2, y0 + 3, true);
        }
    }

    fn exit(&mut self, _ctx: &mut GameContext) {
        self.frame = 0;
    }

    fn demo(&mut self, ctx: &mut GameContext) {
        self.frame = self.frame.wrapping_add(1);
        if self.frame % DEMO_INTERVAL == 0 {
            self.cycle(ctx.game_count, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::Harness;

    #[test]
    fn init_selects_the_first_game_and_blanks_the_score() {
        let mut h = Harness::new(10, 20);
        h.scores.set_score(99);
        let mut menu = Menu::new();
        h.with(|ctx| menu.init(ctx));
        assert_eq!(menu.selected, 1);
        assert_eq!(h.scores.score_display(), "        ");
        assert_eq!(h.scores.highscore_display(), "      99");
    }

    #[test]
    fn left_right_cycle_skipping_the_menu() {
        let mut h = Harness::new(10, 20);
        h.game_count = 4;
        let mut menu = Menu::new();
        h.with(|ctx| menu.init(ctx));

        h.input.insert(Button::Right);
        let mut seen = vec![];
        for _ in 0..4 {
            h.with(|ctx| menu.step(ctx));
            seen.push(menu.selected);
        }
        assert_eq!(seen, vec![2, 3, 1, 2]);

        h.input.clear();
        h.input.insert(Button::Left);
        h.with(|ctx| menu.step(ctx));
        h.with(|ctx| menu.step(ctx));
        assert_eq!(menu.selected, 3);
    }

    #[test]
    fn single_game_does_not_cycle() {
        let mut h = Harness::new(10, 20);
        let mut menu = Menu::new();
        h.with(|ctx| menu.init(ctx));
        h.input.insert(Button::Right);
        h.with(|ctx| menu.step(ctx));
        assert_eq!(menu.selected, 1);
    }

    #[test]
    fn up_launches_the_selection() {
        let mut h = Harness::new(10, 20);
        let mut menu = Menu::new();
        h.with(|ctx| menu.init(ctx));
        assert_eq!(h.with(|ctx| menu.step(ctx)), None);
        h.input.insert(Button::Up);
        assert_eq!(h.with(|ctx| menu.step(ctx)), Some(1));
    }

    #[test]
    fn draws_border_numeral_and_arrows() {
        let mut h = Harness::new(10, 20);
        let mut menu = Menu::new();
        h.with(|ctx| menu.init(ctx));
        h.with(|ctx| menu.draw(ctx));

        assert!(h.grid.get(0, 0));
        assert!(h.grid.get(9, 19));
        // "1" spans x 3..=5, y 7..=11
        assert!(h.grid.get(4, 7));
        assert!(h.grid.get(3, 8));
        assert!(!h.grid.get(3, 7));
        assert!(h.grid.get(5, 11));
        // arrow tips sit two columns out from the numeral
        assert!(h.grid.get(1, 8));
        assert!(h.grid.get(1, 10));
        assert!(h.grid.get(8, 9));
        assert!(h.grid.get(7, 8));
    }

    #[test]
    fn arrows_blink() {
        let mut h = Harness::new(10, 20);
        let mut menu = Menu::new();
        h.with(|ctx| menu.init(ctx));
        menu.frame = BLINK_FRAMES;
        h.with(|ctx| menu.draw(ctx));
        assert!(!h.grid.get(1, 8));
        assert!(!h.grid.get(8, 9));
    }

    #[test]
    fn demo_cycles_on_its_own() {
        let mut h = Harness::new(10, 20);
        h.game_count = 3;
        let mut menu = Menu::new();
        h.with(|ctx| menu.init(ctx));
        for _ in 0..DEMO_INTERVAL {
            h.with(|ctx| menu.demo(ctx));
        }
        assert_eq!(menu.selected, 2);
    }
}
