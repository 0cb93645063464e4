//! # Poller: waits for dependencies with a bounded number of checks.
//!
//! ## Lifecycle of one wait
//! ```text
//! require(deps, on_ready, on_timeout)
//!   ├─► check (synchronous, caller's turn)
//!   │     ├─ ready            ─► on_ready()            ─► Ready
//!   │     └─ 0 × interval ≥ timeout ─► on_timeout()    ─► TimedOut
//!   └─► spawn:
//!         loop {
//!           ├─► sleep(poll_interval) (cancellable)     ─► Cancelled
//!           ├─► check
//!           │     └─ ready    ─► on_ready()            ─► Ready
//!           ├─► attempt += 1
//!           └─► attempt × interval ≥ timeout (read now) ─► on_timeout() ─► TimedOut
//!         }
//! ```
//!
//! ## Rules
//! - Exactly one of `on_ready` / `on_timeout` runs, at most once; none if cancelled.
//! - Checks of one wait are **sequential** (one task, one loop).
//! - The timeout is read on **every cycle**, so [`Poller::set_timeout`] also
//!   affects waits already in flight.
//! - Without `on_timeout`, a timeout writes `require: timeout (<deps>)` to the console.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use super::descriptor::{self, Dependencies, Descriptor};
use super::resolver::Resolve;
use super::wait::{WaitHandle, WaitId, WaitOutcome};
use crate::config::Config;
use crate::console::Console;
use crate::error::ConfigError;

/// Boxed timeout callback.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

struct Inner {
    resolver: Arc<dyn Resolve>,
    console: Console,
    poll_interval: Duration,
    /// Shared by every wait; read once per cycle.
    timeout_ms: AtomicU64,
}

/// Dependency poller.
///
/// Cheap to clone; clones share the resolver, the console and the timeout.
#[derive(Clone)]
pub struct Poller {
    inner: Arc<Inner>,
}

impl Poller {
    /// Creates a poller resolving paths through `resolver`.
    pub fn new(cfg: &Config, resolver: Arc<dyn Resolve>, console: Console) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver,
                console,
                poll_interval: cfg.poll_interval_clamped(),
                timeout_ms: AtomicU64::new(millis(cfg.timeout)),
            }),
        }
    }

    /// Delay between two checks of one wait.
    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    /// Current time budget of a wait.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.inner.timeout_ms.load(Ordering::Relaxed))
    }

    /// Sets the time budget for new **and** pending waits.
    pub fn set_timeout(&self, timeout: Duration) {
        self.inner.timeout_ms.store(millis(timeout), Ordering::Relaxed);
    }

    /// Parses a millisecond count (surrounding whitespace allowed) and applies it.
    ///
    /// Returns the new timeout.
    pub fn set_timeout_str(&self, text: &str) -> Result<Duration, ConfigError> {
        let ms: u64 = text
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout {
                input: text.to_string(),
            })?;
        let timeout = Duration::from_millis(ms);
        self.set_timeout(timeout);
        Ok(timeout)
    }

    /// Returns `true` if `descriptor` is present right now.
    pub fn exists(&self, descriptor: &Descriptor) -> bool {
        descriptor::exists(descriptor, self.inner.resolver.as_ref())
    }

    /// Returns `true` if every dependency is present right now.
    pub fn has_dependencies(&self, deps: &Dependencies) -> bool {
        descriptor::has_dependencies(deps, self.inner.resolver.as_ref())
    }

    /// Runs `on_ready` once `deps` are present, or `on_timeout` once the budget is spent.
    ///
    /// The first check happens before returning; if it settles the wait, the
    /// callback has already run and the handle is finished.
    ///
    /// # Panics
    /// If the first check does not settle the wait and no tokio runtime is running.
    pub fn require<F>(
        &self,
        deps: impl Into<Dependencies>,
        on_ready: F,
        on_timeout: Option<Callback>,
    ) -> WaitHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let deps = deps.into();
        let id = WaitId::new();

        if self.has_dependencies(&deps) {
            tracing::debug!(wait_id = %id, deps = %deps, "dependencies ready");
            on_ready();
            return WaitHandle::done(id, WaitOutcome::Ready);
        }
        if !self.within_budget(0) {
            self.expire(id, &deps, on_timeout);
            return WaitHandle::done(id, WaitOutcome::TimedOut);
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let this = self.clone();
        let join =
            tokio::spawn(async move { this.poll(id, deps, on_ready, on_timeout, token).await });
        WaitHandle::polling(id, cancel, join)
    }

    async fn poll<F>(
        self,
        id: WaitId,
        deps: Dependencies,
        on_ready: F,
        on_timeout: Option<Callback>,
        cancel: CancellationToken,
    ) -> WaitOutcome
    where
        F: FnOnce() + Send + 'static,
    {
        let mut attempt: u64 = 0;

        loop {
            tracing::debug!(wait_id = %id, attempt, "dependencies missing");

            let sleep = time::sleep(self.inner.poll_interval);
            tokio::pin!(sleep);
            select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(wait_id = %id, attempt, "wait cancelled");
                    return WaitOutcome::Cancelled;
                }
                _ = &mut sleep => {}
            }

            if self.has_dependencies(&deps) {
                tracing::debug!(wait_id = %id, attempt, deps = %deps, "dependencies ready");
                on_ready();
                return WaitOutcome::Ready;
            }

            attempt += 1;
            if !self.within_budget(attempt) {
                self.expire(id, &deps, on_timeout);
                return WaitOutcome::TimedOut;
            }
        }
    }

    /// `attempt` failed checks still fit in the current timeout.
    fn within_budget(&self, attempt: u64) -> bool {
        let spent = attempt.saturating_mul(millis(self.inner.poll_interval));
        spent < self.inner.timeout_ms.load(Ordering::Relaxed)
    }

    fn expire(&self, id: WaitId, deps: &Dependencies, on_timeout: Option<Callback>) {
        tracing::debug!(wait_id = %id, deps = %deps, "dependencies timed out");
        match on_timeout {
            Some(cb) => cb(),
            None => self.inner.console.log(format!("require: timeout ({deps})")),
        }
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("poll_interval", &self.inner.poll_interval)
            .field("timeout", &self.timeout())
            .finish()
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{ConsoleConfig, HostInfo, MemorySink};
    use crate::requires::Environment;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn poller(env: &Arc<Environment>) -> (Poller, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let console = Console::new(
            ConsoleConfig {
                enabled: true,
                ..ConsoleConfig::default()
            },
            HostInfo::default(),
            sink.clone(),
        );
        (Poller::new(&Config::default(), env.clone(), console), sink)
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let n = Arc::new(AtomicUsize::new(0));
        let m = Arc::clone(&n);
        (n, move || {
            m.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn ready_dependencies_fire_synchronously_without_runtime() {
        let env = Arc::new(Environment::new());
        env.set("a.b", json!({}));
        let (p, _) = poller(&env);
        let (ready, on_ready) = counter();

        let h = p.require(vec![Descriptor::from("a.b"), true.into()], on_ready, None);
        assert!(h.is_finished());
        assert_eq!(ready.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_timeout_expires_on_first_check() {
        let env = Arc::new(Environment::new());
        let (p, sink) = poller(&env);
        p.set_timeout(Duration::ZERO);
        let (ready, on_ready) = counter();

        let h = p.require("missing", on_ready, None);
        assert!(h.is_finished());
        assert_eq!(ready.load(Ordering::SeqCst), 0);
        assert_eq!(sink.messages(), vec!["require: timeout (missing)".to_string()]);
    }

    #[test]
    fn timeout_accepts_millisecond_text() {
        let env = Arc::new(Environment::new());
        let (p, _) = poller(&env);
        assert_eq!(p.timeout(), Duration::from_secs(10));
        assert_eq!(p.set_timeout_str(" 500 ").unwrap(), Duration::from_millis(500));
        assert_eq!(p.timeout(), Duration::from_millis(500));

        let err = p.set_timeout_str("soon").unwrap_err();
        assert_eq!(err.as_label(), "config_invalid_timeout");
        assert_eq!(p.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn budget_counts_whole_intervals() {
        let env = Arc::new(Environment::new());
        let (p, _) = poller(&env);
        p.set_timeout(Duration::from_millis(250));
        assert!(p.within_budget(0));
        assert!(p.within_budget(2));
        assert!(!p.within_budget(3));
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_timeout() {
        let env = Arc::new(Environment::new());
        let (p, _) = poller(&env);
        let other = p.clone();
        other.set_timeout(Duration::from_millis(100));
        assert_eq!(p.timeout(), Duration::from_millis(100));

        let h = p.require("missing", || {}, None);
        assert_eq!(h.outcome().await, WaitOutcome::TimedOut);
    }
}
