//! Autoplay timer. The scheduler owns the only tick deadline; arming twice
//! replaces it instead of adding a second one.

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    /// No intent to run.
    Stopped,
    /// Armed; fires at `next_tick`.
    Running { next_tick: Instant },
    /// Intent to run, timer cleared (pointer over the slider).
    Paused,
}

/// Serializable view of [`AutoplayState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoplayStatus {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    state: AutoplayState,
    interval: Duration,
}

impl AutoplayScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: AutoplayState::Stopped,
            interval,
        }
    }

    pub fn state(&self) -> AutoplayState {
        self.state
    }

    pub fn status(&self) -> AutoplayStatus {
        match self.state {
            AutoplayState::Stopped => AutoplayStatus::Stopped,
            AutoplayState::Running { .. } => AutoplayStatus::Running,
            AutoplayState::Paused => AutoplayStatus::Paused,
        }
    }

    /// Timer currently armed.
    pub fn is_active(&self) -> bool {
        matches!(self.state, AutoplayState::Running { .. })
    }

    /// Intent to run, whether or not the timer is armed right now.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, AutoplayState::Stopped)
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            AutoplayState::Running { next_tick } => Some(next_tick),
            _ => None,
        }
    }

    /// Arm a fresh interval starting at `now`.
    pub fn start(&mut self, now: Instant) {
        self.arm(now);
    }

    /// Clear the timer but keep the intent.
    pub fn pause(&mut self) {
        if self.is_active() {
            trace!("autoplay paused");
            self.state = AutoplayState::Paused;
        }
    }

    /// Re-arm from zero if autoplay is still wanted.
    pub fn resume(&mut self, now: Instant) {
        if self.state == AutoplayState::Paused {
            self.arm(now);
        }
    }

    /// Restart the running interval from `now`; no effect while paused or
    /// stopped.
    pub fn restart(&mut self, now: Instant) {
        if self.is_active() {
            self.arm(now);
        }
    }

    pub fn stop(&mut self) {
        if self.is_enabled() {
            trace!("autoplay stopped");
        }
        self.state = AutoplayState::Stopped;
    }

    /// Consume a due tick and schedule the next one one interval after it.
    /// Returns the instant the tick was due at.
    pub fn fire_due(&mut self, now: Instant) -> Option<Instant> {
        match self.state {
            AutoplayState::Running { next_tick } if next_tick <= now => {
                self.state = AutoplayState::Running {
                    next_tick: next_tick + self.interval,
                };
                Some(next_tick)
            }
            _ => None,
        }
    }

    fn arm(&mut self, now: Instant) {
        let next_tick = now + self.interval;
        trace!(interval_ms = self.interval.as_millis() as u64, "autoplay armed");
        self.state = AutoplayState::Running { next_tick };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_millis(1000);

    #[test]
    fn ticks_repeat_at_fixed_period() {
        let t0 = Instant::now();
        let mut scheduler = AutoplayScheduler::new(SECOND);
        scheduler.start(t0);

        assert_eq!(scheduler.fire_due(t0 + Duration::from_millis(999)), None);
        assert_eq!(scheduler.fire_due(t0 + SECOND), Some(t0 + SECOND));
        assert_eq!(scheduler.deadline(), Some(t0 + 2 * SECOND));
    }

    #[test]
    fn start_twice_rearms_single_deadline() {
        let t0 = Instant::now();
        let mut scheduler = AutoplayScheduler::new(SECOND);
        scheduler.start(t0);
        scheduler.start(t0 + Duration::from_millis(400));

        assert_eq!(
            scheduler.deadline(),
            Some(t0 + Duration::from_millis(1400))
        );
        assert_eq!(scheduler.fire_due(t0 + SECOND), None);
    }

    #[test]
    fn pause_and_resume_restart_from_zero() {
        let t0 = Instant::now();
        let mut scheduler = AutoplayScheduler::new(SECOND);
        scheduler.start(t0);

        scheduler.pause();
        assert_eq!(scheduler.state(), AutoplayState::Paused);
        assert!(scheduler.is_enabled());
        assert_eq!(scheduler.fire_due(t0 + 5 * SECOND), None);

        let leave = t0 + Duration::from_millis(2500);
        scheduler.resume(leave);
        assert_eq!(scheduler.deadline(), Some(leave + SECOND));
    }

    #[test]
    fn resume_without_intent_stays_stopped() {
        let t0 = Instant::now();
        let mut scheduler = AutoplayScheduler::new(SECOND);
        scheduler.resume(t0);
        assert_eq!(scheduler.state(), AutoplayState::Stopped);

        scheduler.start(t0);
        scheduler.stop();
        scheduler.resume(t0);
        assert_eq!(scheduler.status(), AutoplayStatus::Stopped);
    }

    #[test]
    fn restart_only_touches_running_timer() {
        let t0 = Instant::now();
        let mut scheduler = AutoplayScheduler::new(SECOND);
        scheduler.start(t0);
        scheduler.pause();
        scheduler.restart(t0 + SECOND);
        assert_eq!(scheduler.state(), AutoplayState::Paused);
    }
}
