//! Fixed-timestep scheduler
//!
//! Holds the `last_tick`/`interval` pair itself instead of closing over a
//! timer primitive, so any clock - including a test clock - can drive it.
//! `tick(now)` advances the last-tick timestamp by whole intervals rather
//! than by raw elapsed time, which keeps long-run cadence drift-free.

/// Maximum simulation steps returned by a single `tick` call. Past this the
/// backlog is dropped to avoid the spiral of death after a long stall.
pub const MAX_CATCHUP_STEPS: u32 = 8;

#[derive(Debug, Clone)]
pub struct Scheduler {
    interval_ms: f64,
    last_tick_ms: Option<f64>,
    running: bool,
}

impl Scheduler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_tick_ms: None,
            running: false,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.running = true;
        self.last_tick_ms = Some(now_ms);
    }

    /// Stop driving the simulation. Idempotent; leaves no pending backlog.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_tick_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Retune the cadence (snake speed-ups, tetris level drops).
    pub fn set_interval_ms(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms.max(1.0);
    }

    /// Rebase the timestamp after a pause so resuming never produces a
    /// catch-up burst for the time spent frozen.
    pub fn resume(&mut self, now_ms: f64) {
        if self.running {
            self.last_tick_ms = Some(now_ms);
        }
    }

    /// How many simulation steps are due at `now_ms`. The host must request
    /// a render after every call regardless of the returned count.
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let last = self.last_tick_ms.get_or_insert(now_ms);

        let mut steps = 0;
        while now_ms - *last >= self.interval_ms && steps < MAX_CATCHUP_STEPS {
            *last += self.interval_ms;
            steps += 1;
        }
        if steps == MAX_CATCHUP_STEPS && now_ms - *last >= self.interval_ms {
            // Stalled far behind; drop the rest of the backlog.
            *last = now_ms;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_steps_before_interval_elapses() {
        let mut sched = Scheduler::new(100.0);
        sched.start(0.0);
        assert_eq!(sched.tick(50.0), 0);
        assert_eq!(sched.tick(99.9), 0);
        assert_eq!(sched.tick(100.0), 1);
    }

    #[test]
    fn advance_is_drift_free() {
        let mut sched = Scheduler::new(100.0);
        sched.start(0.0);
        // Each tick arrives 30ms late; the fractional lag must accumulate
        // into an extra step rather than being discarded.
        assert_eq!(sched.tick(130.0), 1);
        assert_eq!(sched.tick(260.0), 1);
        assert_eq!(sched.tick(390.0), 1);
        // 90ms of accumulated lag plus 40ms elapsed crosses the boundary.
        assert_eq!(sched.tick(430.0), 1);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut sched = Scheduler::new(10.0);
        sched.start(0.0);
        assert_eq!(sched.tick(10_000.0), MAX_CATCHUP_STEPS);
        // Backlog dropped: the next nearby tick owes at most one step.
        assert!(sched.tick(10_010.0) <= 1);
    }

    #[test]
    fn stop_is_idempotent_and_halts_steps() {
        let mut sched = Scheduler::new(10.0);
        sched.start(0.0);
        sched.stop();
        sched.stop();
        assert!(!sched.is_running());
        assert_eq!(sched.tick(1_000.0), 0);
    }

    #[test]
    fn resume_does_not_burst() {
        let mut sched = Scheduler::new(10.0);
        sched.start(0.0);
        assert_eq!(sched.tick(10.0), 1);
        // Host pauses for five seconds, then rebases.
        sched.resume(5_010.0);
        assert_eq!(sched.tick(5_015.0), 0);
        assert_eq!(sched.tick(5_020.0), 1);
    }

    #[test]
    fn retuned_interval_applies_to_next_step() {
        let mut sched = Scheduler::new(100.0);
        sched.start(0.0);
        assert_eq!(sched.tick(100.0), 1);
        sched.set_interval_ms(50.0);
        assert_eq!(sched.tick(150.0), 1);
        assert_eq!(sched.tick(200.0), 1);
    }
}
