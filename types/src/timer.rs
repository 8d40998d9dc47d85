use std::time::Duration;

/// Countdown driven by explicit `advance` calls rather than wall-clock reads.
#[derive(Debug, Clone)]
pub struct DelayTimer {
    elapsed: Duration,
    delay: Duration,
}

impl DelayTimer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            delay,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.delay
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.delay.saturating_sub(self.elapsed)
    }
}
