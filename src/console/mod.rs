//! # Gated console logger.
//!
//! [`Console`] decides whether a message is written at all, renders it, and hands
//! it to a [`LogSink`]. The decision depends on a [`ConsoleConfig`] and on the
//! [`HostInfo`] of the running program (see [`ConsoleConfig`] for the rule).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use evoke::{Console, ConsoleConfig, HostInfo, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let console = Console::new(
//!     ConsoleConfig::default(),
//!     HostInfo::new("localhost", "Mozilla/5.0"),
//!     sink.clone(),
//! );
//!
//! console.log("hello");
//! assert_eq!(sink.messages(), vec!["hello".to_string()]);
//! ```

mod policy;
mod sink;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

pub use policy::{ConsoleConfig, DEFAULT_ENABLED_DOMAINS, HostInfo};
pub use sink::{Level, LogSink, MemorySink, TracingSink};

struct Inner {
    /// Latches to `true` once enabled explicitly or by a domain match.
    enabled: AtomicBool,
    mobile_enabled: bool,
    object_to_string: bool,
    domains: RwLock<Vec<String>>,
    host: HostInfo,
    sink: Arc<dyn LogSink>,
}

/// Console logger; cheap to clone, clones share state.
#[derive(Clone)]
pub struct Console {
    inner: Arc<Inner>,
}

impl Console {
    /// Creates a console writing to `sink`.
    pub fn new(cfg: ConsoleConfig, host: HostInfo, sink: Arc<dyn LogSink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                enabled: AtomicBool::new(cfg.enabled),
                mobile_enabled: cfg.mobile_enabled,
                object_to_string: cfg.object_to_string,
                domains: RwLock::new(policy::with_default_domains(cfg.enabled_domains)),
                host,
                sink,
            }),
        }
    }

    /// Creates a console writing through `tracing`.
    pub fn tracing(cfg: ConsoleConfig, host: HostInfo) -> Self {
        Self::new(cfg, host, Arc::new(TracingSink))
    }

    /// Creates a console that is explicitly enabled and writes through `tracing`.
    pub fn enabled() -> Self {
        let cfg = ConsoleConfig {
            enabled: true,
            ..ConsoleConfig::default()
        };
        Self::tracing(cfg, HostInfo::default())
    }

    /// Enables output regardless of hostname.
    pub fn enable(&self) {
        self.inner.enabled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` if the console is enabled for this host.
    ///
    /// A hostname match latches the console on.
    pub fn is_enabled(&self) -> bool {
        if self.inner.enabled.load(Ordering::Relaxed) {
            return true;
        }
        let domains = self
            .inner
            .domains
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if self.inner.host.matches_any(&domains) {
            self.inner.enabled.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    /// Replaces the enabled domains; the defaults are always kept.
    ///
    /// Returns the resulting list.
    pub fn set_enabled_domains<I, S>(&self, domains: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = policy::with_default_domains(domains);
        let mut guard = self
            .inner
            .domains
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = next.clone();
        next
    }

    /// Returns the current enabled domains.
    pub fn enabled_domains(&self) -> Vec<String> {
        self.inner
            .domains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Writes a message at [`Level::Log`].
    pub fn log(&self, message: impl Into<Value>) {
        self.write(Level::Log, &message.into());
    }

    /// Writes a message at [`Level::Warn`].
    pub fn warn(&self, message: impl Into<Value>) {
        self.write(Level::Warn, &message.into());
    }

    /// Writes a message at [`Level::Error`].
    pub fn error(&self, message: impl Into<Value>) {
        self.write(Level::Error, &message.into());
    }

    fn allowed(&self) -> bool {
        let host = &self.inner.host;
        self.is_enabled() && (host.is_local() || !host.is_mobile() || self.inner.mobile_enabled)
    }

    fn write(&self, level: Level, message: &Value) {
        if !self.allowed() {
            return;
        }
        let pretty = self.inner.object_to_string && level == Level::Log;
        self.inner.sink.write(level, &render(message, pretty));
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("enabled", &self.inner.enabled.load(Ordering::Relaxed))
            .field("host", &self.inner.host)
            .finish()
    }
}

/// Strings are written verbatim; other values as JSON.
fn render(message: &Value, pretty: bool) -> String {
    match message {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) if pretty => {
            serde_json::to_string_pretty(message).unwrap_or_else(|_| message.to_string())
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn console(cfg: ConsoleConfig, host: HostInfo) -> (Console, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Console::new(cfg, host, sink.clone()), sink)
    }

    #[test]
    fn disabled_on_public_host() {
        let (c, sink) = console(
            ConsoleConfig::default(),
            HostInfo::new("www.example.com", "Mozilla/5.0 (X11)"),
        );
        c.log("hidden");
        c.warn("hidden");
        c.error("hidden");
        assert!(sink.lines().is_empty());
        assert!(!c.is_enabled());
    }

    #[test]
    fn local_host_enables_and_latches() {
        let (c, sink) = console(
            ConsoleConfig::default(),
            HostInfo::new("localhost", "Mozilla/5.0"),
        );
        c.warn("careful");
        assert_eq!(sink.lines(), vec![(Level::Warn, "careful".to_string())]);

        // latched even if the domain list no longer matches
        c.set_enabled_domains(["other.example.com"]);
        assert!(c.is_enabled());
    }

    #[test]
    fn custom_domain_enables() {
        let (c, sink) = console(
            ConsoleConfig::default(),
            HostInfo::new("staging.example.com", "Mozilla/5.0"),
        );
        c.log("before");
        let domains = c.set_enabled_domains(["STAGING."]);
        assert_eq!(domains, vec!["STAGING.", "localhost", ".local."]);
        c.log("after");
        assert_eq!(sink.messages(), vec!["after".to_string()]);
    }

    #[test]
    fn mobile_requires_opt_in_unless_local() {
        let host = HostInfo::new("www.example.com", "Mozilla/5.0 (Linux; Android 14)");
        let cfg = ConsoleConfig {
            enabled: true,
            ..ConsoleConfig::default()
        };
        let (c, sink) = console(cfg.clone(), host.clone());
        c.log("dropped");
        assert!(sink.lines().is_empty());

        let (c, sink) = console(
            ConsoleConfig {
                mobile_enabled: true,
                ..cfg
            },
            host,
        );
        c.log("kept");
        assert_eq!(sink.messages(), vec!["kept".to_string()]);

        let (c, sink) = console(
            ConsoleConfig::default(),
            HostInfo::new("dev.local.lan", "iPhone"),
        );
        c.log("local mobile");
        assert_eq!(sink.messages(), vec!["local mobile".to_string()]);
    }

    #[test]
    fn objects_render_as_json() {
        let cfg = ConsoleConfig {
            enabled: true,
            object_to_string: true,
            ..ConsoleConfig::default()
        };
        let (c, sink) = console(cfg, HostInfo::default());
        c.log(json!({"a": 1}));
        c.error(json!({"a": 1}));
        c.log(json!(3));

        let msgs = sink.messages();
        assert_eq!(msgs[0], "{\n  \"a\": 1\n}");
        assert_eq!(msgs[1], "{\"a\":1}");
        assert_eq!(msgs[2], "3");
    }

    #[test]
    fn enable_overrides_hostname() {
        let (c, sink) = console(ConsoleConfig::default(), HostInfo::new("prod.example.com", ""));
        c.enable();
        c.log("on");
        assert_eq!(sink.messages(), vec!["on".to_string()]);
    }
}
