//! # Output sinks for the console.
//!
//! A [`LogSink`] receives lines that already passed the console's gating policy.
//!
//! - [`TracingSink`] forwards to `tracing` (`info!`/`warn!`/`error!`, target `evoke::console`).
//! - [`MemorySink`] keeps lines in memory; use it for tests or to inspect output.

use std::sync::{Mutex, PoisonError};

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Log,
    Warn,
    Error,
}

/// Destination for console lines.
pub trait LogSink: Send + Sync + 'static {
    /// Writes one already-rendered line.
    fn write(&self, level: Level, line: &str);
}

/// Sink that forwards every line to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: Level, line: &str) {
        match level {
            Level::Log => tracing::info!(target: "evoke::console", "{line}"),
            Level::Warn => tracing::warn!(target: "evoke::console", "{line}"),
            Level::Error => tracing::error!(target: "evoke::console", "{line}"),
        }
    }
}

/// Sink that records lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    /// Construct a new empty [`MemorySink`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns only the text of every line written so far.
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, line)| line).collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: Level, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, line.to_string()));
    }
}
