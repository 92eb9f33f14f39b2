//! Startup clock and readiness gating.
//!
//! Health state is derived from uptime alone: the service reports ready once
//! the configured grace period has elapsed since [`StartupClock::start`].

use std::time::{Duration, Instant};

/// Monotonic timestamp captured once when the service starts.
#[derive(Clone, Copy, Debug)]
pub struct StartupClock {
    started_at: Instant,
    /// Uptime already accrued when `started_at` was taken.
    head_start: Duration,
}

impl StartupClock {
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    /// Build a clock anchored at an arbitrary instant.
    pub fn started_at(started_at: Instant) -> Self {
        Self {
            started_at,
            head_start: Duration::ZERO,
        }
    }

    /// Build a clock that already reports `uptime` right now.
    pub fn with_uptime(uptime: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            head_start: uptime,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Uptime as seen at `now`. An instant before the anchor adds nothing.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.head_start + now.saturating_duration_since(self.started_at)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    NotReady,
    Ready,
}

impl Readiness {
    /// Ready once `elapsed >= threshold`; the boundary itself counts as ready.
    pub fn evaluate(elapsed: Duration, threshold: Duration) -> Self {
        if elapsed >= threshold {
            Readiness::Ready
        } else {
            Readiness::NotReady
        }
    }

    pub fn is_ready(self) -> bool {
        self == Readiness::Ready
    }

    /// Status string for `/health`.
    pub fn liveness_status(self) -> &'static str {
        match self {
            Readiness::Ready => "healthy",
            Readiness::NotReady => "not_ready",
        }
    }

    /// Status string for `/ready`.
    pub fn readiness_status(self) -> &'static str {
        match self {
            Readiness::Ready => "ready",
            Readiness::NotReady => "not_ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: Duration = Duration::from_secs(30);

    #[test]
    fn not_ready_before_threshold() {
        let r = Readiness::evaluate(THRESHOLD - Duration::from_millis(100), THRESHOLD);
        assert_eq!(r, Readiness::NotReady);
        assert_eq!(r.liveness_status(), "not_ready");
        assert_eq!(r.readiness_status(), "not_ready");
    }

    #[test]
    fn ready_exactly_at_threshold() {
        let r = Readiness::evaluate(THRESHOLD, THRESHOLD);
        assert!(r.is_ready());
        assert_eq!(r.liveness_status(), "healthy");
        assert_eq!(r.readiness_status(), "ready");
    }

    #[test]
    fn zero_threshold_is_ready_immediately() {
        assert!(Readiness::evaluate(Duration::ZERO, Duration::ZERO).is_ready());
    }

    #[test]
    fn clock_measures_from_start() {
        let start = Instant::now();
        let clock = StartupClock::started_at(start);
        assert_eq!(clock.elapsed_at(start + THRESHOLD), THRESHOLD);
        assert_eq!(clock.elapsed_at(start), Duration::ZERO);
    }

    #[test]
    fn clock_with_uptime_reports_it() {
        let clock = StartupClock::with_uptime(Duration::from_secs(60));
        assert!(clock.elapsed() >= Duration::from_secs(60));
        assert!(Readiness::evaluate(clock.elapsed(), THRESHOLD).is_ready());
    }

    #[test]
    fn clock_with_uptime_keeps_counting() {
        let clock = StartupClock::with_uptime(Duration::from_secs(10));
        let now = Instant::now();
        let later = clock.elapsed_at(now + Duration::from_secs(25));
        assert!(later >= Duration::from_secs(35));
    }
}
