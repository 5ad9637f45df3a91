use std::time::Duration;

/// Visual path of one spin: eases out from `from` to `to` over `duration`.
///
/// Only the renderer reads this. The winner is decided from `to`, never from an intermediate
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    from: f64,
    to: f64,
    duration: Duration,
}

impl SpinAnimation {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn rotation_at(&self, elapsed: Duration) -> f64 {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
