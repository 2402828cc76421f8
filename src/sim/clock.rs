//! Frame timing for animation loops
//!
//! Wraps the millisecond timestamps handed to an animation callback and
//! turns them into per-frame delta seconds, so the loops themselves stay
//! pure and testable off the browser.

/// Converts raw callback timestamps into clamped delta-time steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    running: bool,
    last_timestamp: Option<f64>,
    /// Upper bound on a single step in seconds, if any
    max_step: Option<f64>,
}

impl FrameClock {
    pub fn new(max_step: Option<f64>) -> Self {
        Self {
            running: false,
            last_timestamp: None,
            max_step,
        }
    }

    /// Begin a run; the first tick after this reports a zero delta
    pub fn start(&mut self) {
        self.running = true;
        self.last_timestamp = None;
    }

    /// Idempotent
    pub fn stop(&mut self) {
        self.running = false;
        self.last_timestamp = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Delta seconds since the previous tick, or `None` when stopped
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        let dt = match self.last_timestamp {
            None => 0.0,
            Some(last) => {
                let raw = (timestamp_ms - last) / 1000.0;
                match self.max_step {
                    Some(cap) => raw.min(cap),
                    None => raw,
                }
            }
        };
        self.last_timestamp = Some(timestamp_ms);
        Some(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new(None);
        clock.start();
        assert_eq!(clock.tick(1000.0), Some(0.0));
        assert_eq!(clock.tick(1016.0), Some(0.016));
    }

    #[test]
    fn test_stopped_clock_yields_nothing() {
        let mut clock = FrameClock::new(None);
        assert_eq!(clock.tick(1000.0), None);
        clock.start();
        clock.tick(1000.0);
        clock.stop();
        assert_eq!(clock.tick(2000.0), None);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut clock = FrameClock::new(None);
        clock.start();
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
    }

    #[test]
    fn test_max_step_caps_slow_frame() {
        let mut clock = FrameClock::new(Some(0.05));
        clock.start();
        clock.tick(0.0);
        // A one-second stall still steps by at most the cap
        assert_eq!(clock.tick(1000.0), Some(0.05));
    }

    #[test]
    fn test_restart_discards_stale_timestamp() {
        let mut clock = FrameClock::new(None);
        clock.start();
        clock.tick(5000.0);
        clock.stop();
        clock.start();
        // Without the reset this would be a huge negative delta
        assert_eq!(clock.tick(100.0), Some(0.0));
    }
}
