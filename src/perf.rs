use std::collections::VecDeque;
use std::time::Duration;

const HISTORY: usize = 100;

/// Rolling average of recent frame times.
#[derive(Debug, Default)]
pub struct FrameMeter {
    samples: VecDeque<Duration>,
}

impl FrameMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, frame_time: Duration) {
        if self.samples.len() == HISTORY {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);
    }

    pub fn average_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: Duration = self.samples.iter().sum();
        total.as_secs_f32() * 1000.0 / self.samples.len() as f32
    }

    pub fn fps(&self) -> f32 {
        let ms = self.average_ms();
        if ms <= 0.0 { 0.0 } else { 1000.0 / ms }
    }
}
