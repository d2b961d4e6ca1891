use std::time::Duration;

/// Home-page statistic that counts up from zero after the page opens.
#[derive(Debug, Clone, Copy)]
pub struct AnimatedCounter {
    pub end: u32,
    pub suffix: &'static str,
    pub label: &'static str,
    pub duration: Duration,
}

impl AnimatedCounter {
    pub const fn new(end: u32, suffix: &'static str, label: &'static str) -> Self {
        Self {
            end,
            suffix,
            label,
            duration: Duration::from_secs(2),
        }
    }

    /// Value shown `elapsed` after the animation started.
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        if self.duration.is_zero() {
            return self.end;
        }
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        (progress * self.end as f64).floor() as u32
    }

    pub fn display_at(&self, elapsed: Duration) -> String {
        format!("{}{}", self.value_at(elapsed), self.suffix)
    }
}

pub const HOME_COUNTERS: [AnimatedCounter; 3] = [
    AnimatedCounter::new(150, "+", "Trusted Sources"),
    AnimatedCounter::new(99, "%", "Accuracy Rate"),
    AnimatedCounter::new(50000, "+", "Articles Analyzed"),
];
