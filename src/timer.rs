use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub interval: Duration,
    pub running: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { interval: DEFAULT_INTERVAL, running: false }
    }
}

/// Periodic playback tick, polled from the event loop.
///
/// At most one tick is reported per poll, so a stalled frame never causes a
/// burst of catch-up generations.
#[derive(Debug)]
pub struct Timer {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Timer {
    pub fn new(config: TimerConfig, now: Instant) -> Self {
        let mut timer = Self { interval: config.interval, next_tick: None };
        if config.running {
            timer.start(now);
        }
        timer
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)starts the period from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    /// Changes the period; a running timer restarts from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_running() {
            self.start(now);
        }
    }

    /// Returns true when a tick is due and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(due) if now >= due => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
