//! Score and high score, kept as fixed-width strings for the 7-segment panels.

pub const DEFAULT_DISPLAY_WIDTH: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for ScoreValue {
    fn from(v: i64) -> Self {
        ScoreValue::Int(v)
    }
}

impl From<i32> for ScoreValue {
    fn from(v: i32) -> Self {
        ScoreValue::Int(v as i64)
    }
}

impl From<u32> for ScoreValue {
    fn from(v: u32) -> Self {
        ScoreValue::Int(v as i64)
    }
}

impl From<f64> for ScoreValue {
    fn from(v: f64) -> Self {
        ScoreValue::Float(v)
    }
}

impl From<&str> for ScoreValue {
    fn from(v: &str) -> Self {
        ScoreValue::Text(v.to_string())
    }
}

impl From<String> for ScoreValue {
    fn from(v: String) -> Self {
        ScoreValue::Text(v)
    }
}

#[derive(Debug, Clone)]
pub struct ScoreBoard {
    score: f64,
    highscore: f64,
    score_display: String,
    highscore_display: String,
    width: usize,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WIDTH)
    }
}

impl ScoreBoard {
    pub fn new(width: usize) -> Self {
        let blank = " ".repeat(width);
        Self {
            score: 0.0,
            highscore: 0.0,
            score_display: blank.clone(),
            highscore_display: blank,
            width,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn highscore(&self) -> f64 {
        self.highscore
    }

    pub fn score_display(&self) -> &str {
        &self.score_display
    }

    pub fn highscore_display(&self) -> &str {
        &self.highscore_display
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Right-align `text` in the display width. Text that is already too
    /// long is returned as is and will overflow the panel.
    pub fn format(&self, text: &str) -> String {
        format!("{:>width$}", text, width = self.width)
    }

    pub fn set_score(&mut self, value: impl Into<ScoreValue>) {
        match value.into() {
            ScoreValue::Int(v) => {
                self.record(v as f64);
                self.score_display = self.format(&v.to_string());
            }
            ScoreValue::Float(v) => {
                self.record(v);
                self.score_display = self.format(&v.to_string());
            }
            // pre-formatted text only replaces what is shown
            ScoreValue::Text(text) => {
                self.score_display = self.format(&text);
            }
        }
    }

    /// Add to the numeric score. Fractional scores keep their fraction.
    pub fn increment_score(&mut self, amount: i64) {
        let next = self.score + amount as f64;
        self.set_score(next);
    }

    fn record(&mut self, value: f64) {
        self.score = value;
        if value > self.highscore {
            self.highscore = value;
        }
        self.highscore_display = self.format(&self.highscore.to_string());
    }
}
