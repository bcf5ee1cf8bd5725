// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tick clock implementation.
//!
//! This module provides the 1 Hz clock that paces playback. The clock
//! only reports readiness; the run loop forwards each due tick to the
//! playback controller. Ticks are never queued or batched: a missed
//! wall-clock deadline produces one tick, not a burst.

use std::time::{Duration, Instant};

use tracing::debug;

/// Seconds advance one at a time
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tick clock state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

/// Wall-clock tick source
#[derive(Debug)]
pub struct TickClock {
    period: Duration,
    state: ClockState,
    last_tick: Option<Instant>,
}

impl TickClock {
    /// Create a stopped clock with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: ClockState::Stopped,
            last_tick: None,
        }
    }

    /// The configured tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Current clock state
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Start ticking; the first tick is due one full period from now
    pub fn start(&mut self) {
        self.state = ClockState::Running;
        self.last_tick = Some(Instant::now());
        debug!("clock started");
    }

    /// Stop and forget the anchor
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
        self.last_tick = None;
        debug!("clock stopped");
    }

    /// Suspend tick delivery without losing the running session
    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
            debug!("clock paused");
        }
    }

    /// Resume from pause; re-anchors so the next tick is a full
    /// period away (no replay of time spent paused)
    pub fn resume(&mut self) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
            self.last_tick = Some(Instant::now());
            debug!("clock resumed");
        }
    }

    /// Check whether a tick is due. Returns true at most once per
    /// elapsed period and re-anchors on each report.
    pub fn poll(&mut self) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        let now = Instant::now();
        match self.last_tick {
            Some(last) if now.duration_since(last) >= self.period => {
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Time until the next tick is due; zero when overdue or not
    /// running. The run loop uses this to bound its event-poll wait.
    pub fn time_until_next_tick(&self) -> Duration {
        if self.state != ClockState::Running {
            return Duration::ZERO;
        }
        match self.last_tick {
            Some(last) => {
                let elapsed = last.elapsed();
                if elapsed < self.period {
                    self.period - elapsed
                } else {
                    Duration::ZERO
                }
            }
            None => Duration::ZERO,
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = TickClock::default();
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.period(), TICK_PERIOD);
    }

    #[test]
    fn test_stopped_clock_never_ticks() {
        let mut clock = TickClock::new(Duration::from_millis(1));
        thread::sleep(Duration::from_millis(5));
        assert!(!clock.poll());
        assert_eq!(clock.time_until_next_tick(), Duration::ZERO);
    }

    #[test]
    fn test_tick_after_period() {
        let mut clock = TickClock::new(Duration::from_millis(10));
        clock.start();

        assert!(!clock.poll());
        thread::sleep(Duration::from_millis(15));
        assert!(clock.poll());

        // Re-anchored: not immediately due again
        assert!(!clock.poll());
    }

    #[test]
    fn test_pause_suppresses_polls() {
        let mut clock = TickClock::new(Duration::from_millis(5));
        clock.start();
        clock.pause();
        assert_eq!(clock.state(), ClockState::Paused);

        thread::sleep(Duration::from_millis(10));
        assert!(!clock.poll());
    }

    #[test]
    fn test_resume_reanchors() {
        let mut clock = TickClock::new(Duration::from_millis(50));
        clock.start();
        clock.pause();
        thread::sleep(Duration::from_millis(60));

        clock.resume();
        assert_eq!(clock.state(), ClockState::Running);
        // Time spent paused is not replayed
        assert!(!clock.poll());
        assert!(clock.time_until_next_tick() > Duration::from_millis(30));
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut clock = TickClock::default();
        clock.pause();
        assert_eq!(clock.state(), ClockState::Stopped);

        clock.resume();
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn test_no_tick_batching() {
        let mut clock = TickClock::new(Duration::from_millis(5));
        clock.start();

        // Several periods elapse, but a single poll reports one tick
        thread::sleep(Duration::from_millis(25));
        assert!(clock.poll());
        assert!(!clock.poll());
    }
}
