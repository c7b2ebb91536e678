//! Fixed-rate ticker driven by a variable frame clock

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Accumulates frame time and hands out whole simulation steps
#[derive(Debug, Clone)]
pub struct FixedTicker {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTicker {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
            last_time_ms: None,
        }
    }

    /// Feed a frame timestamp (ms, e.g. from requestAnimationFrame).
    ///
    /// Returns how many fixed steps to run now. The first call only
    /// establishes the time base and yields one step.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => self.step,
        };
        self.last_time_ms = Some(time_ms);
        self.advance(dt)
    }

    /// Add `dt` seconds and return the number of steps due
    pub fn advance(&mut self, dt: f32) -> u32 {
        // Long stalls (tab hidden, debugger) are not replayed
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Forget accumulated time (after pauses or restarts)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_hz_frames_give_one_step() {
        let mut ticker = FixedTicker::default();
        assert_eq!(ticker.frame(0.0), 1);
        let mut total = 0;
        for i in 1..=60 {
            total += ticker.frame(i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=61).contains(&total));
    }

    #[test]
    fn test_fast_display_accumulates() {
        let mut ticker = FixedTicker::default();
        // 144 Hz display
        let steps: u32 = (0..144).map(|_| ticker.advance(1.0 / 144.0)).sum();
        assert!((59..=61).contains(&steps));
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut ticker = FixedTicker::new(SIM_DT, 4);
        assert_eq!(ticker.advance(0.1), 4);
        // Backlog dropped: the next tiny frame yields at most one step
        assert!(ticker.advance(0.001) <= 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut ticker = FixedTicker::default();
        assert_eq!(ticker.advance(-1.0), 0);
        assert_eq!(ticker.advance(SIM_DT * 0.5), 0);
    }

    #[test]
    fn test_reset_clears_time_base() {
        let mut ticker = FixedTicker::default();
        ticker.frame(1000.0);
        ticker.reset();
        assert_eq!(ticker.frame(5000.0), 1);
    }
}
