#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tap-driven autofire system that rate-gates bullet spawns.
//!
//! Taps arriving within the configured window extend a burst and raise the
//! instantaneous fire rate; the rate is capped at a configured ceiling and
//! the burst dies as soon as the window elapses without a fresh tap. Both
//! operations are total: they degrade to "no shot fired" rather than
//! failing.

use std::time::Duration;

use gemfire_core::{Command, AUTOFIRE_TAP_WINDOW, MAX_ROUNDS_PER_SECOND};

/// Configuration parameters required to construct the autofire system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    tap_window: Duration,
    max_rounds_per_second: u32,
}

impl Config {
    /// Creates a new configuration from a tap window and rate ceiling.
    #[must_use]
    pub const fn new(tap_window: Duration, max_rounds_per_second: u32) -> Self {
        Self {
            tap_window,
            max_rounds_per_second,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(AUTOFIRE_TAP_WINDOW, MAX_ROUNDS_PER_SECOND)
    }
}

/// Stateful system that converts tap bursts into fire commands.
///
/// Owns the session-lived fire state: the running tap count plus the last
/// tap and last shot timestamps. Mutated only from the simulation-tick
/// context; tap events from other threads must be queued into the frame
/// input rather than registered in place.
#[derive(Debug)]
pub struct Autofire {
    tap_window: Duration,
    max_rounds_per_second: u32,
    tap_count: u32,
    last_tap: Option<Duration>,
    last_fire: Option<Duration>,
}

impl Autofire {
    /// Creates a new autofire system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tap_window: config.tap_window,
            max_rounds_per_second: config.max_rounds_per_second,
            tap_count: 0,
            last_tap: None,
            last_fire: None,
        }
    }

    /// Records a fire tap at the provided session timestamp.
    ///
    /// A tap inside the window extends the current burst; anything later
    /// starts a fresh burst of one.
    pub fn register_tap(&mut self, at: Duration) {
        let in_burst = self
            .last_tap
            .map_or(false, |last| at.saturating_sub(last) < self.tap_window);
        self.tap_count = if in_burst { self.tap_count + 1 } else { 1 };
        self.last_tap = Some(at);
    }

    /// Emits a `Command::FireBullet` when the tap-derived rate allows one.
    ///
    /// Silent when no tap was ever registered or the burst expired, so the
    /// rate division below never sees a zero tap count.
    pub fn handle(&mut self, now: Duration, out: &mut Vec<Command>) {
        let Some(last_tap) = self.last_tap else {
            return;
        };
        if now.saturating_sub(last_tap) >= self.tap_window {
            return;
        }

        let rate = (f64::from(self.tap_count) / self.tap_window.as_secs_f64())
            .min(f64::from(self.max_rounds_per_second));
        let interval = Duration::from_secs_f64(1.0 / rate);

        let ready = self
            .last_fire
            .map_or(true, |last| now.saturating_sub(last) > interval);
        if ready {
            out.push(Command::FireBullet);
            self.last_fire = Some(now);
        }
    }
}

impl Default for Autofire {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
