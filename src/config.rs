//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the poller and the console.
//!
//! Config is used in two ways:
//! 1. **Poller creation**: `Poller::new(&config, resolver, console)`
//! 2. **Console creation**: `Console::new(config.console.clone(), host, sink)`
//!
//! ## Sentinel values
//! - `poll_interval = 0s` → clamped to 1ms (a zero interval would spin)
//! - `timeout = 0s` → waits time out after their first failed check

use std::time::Duration;

use crate::console::ConsoleConfig;

/// Default delay between two checks of the same wait.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default time budget of a wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Global configuration for the poller and console.
///
/// ## Field semantics
/// - `poll_interval`: Delay between two checks of one wait (min 1ms)
/// - `timeout`: Initial time budget of every wait; adjustable later via
///   [`Poller::set_timeout`](crate::Poller::set_timeout)
/// - `console`: Gating policy for the console logger
#[derive(Clone, Debug)]
pub struct Config {
    /// Delay between two checks of the same wait.
    ///
    /// Also the unit of the attempt budget: a wait gives up once
    /// `attempt × poll_interval` reaches `timeout`.
    pub poll_interval: Duration,

    /// Time budget of a wait before it times out.
    pub timeout: Duration,

    /// Console gating policy.
    pub console: ConsoleConfig,
}

impl Config {
    /// Returns the poll interval clamped to a minimum of 1ms.
    #[inline]
    pub fn poll_interval_clamped(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `poll_interval = 100ms`
    /// - `timeout = 10s`
    /// - `console = ConsoleConfig::default()` (disabled, default domains)
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            console: ConsoleConfig::default(),
        }
    }
}
