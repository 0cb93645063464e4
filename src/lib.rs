//! # evoke
//!
//! **Evoke** is a small in-process coordination toolkit.
//!
//! It provides a named event registry with ordered, deduplicated subscribers, and
//! a dependency poller that runs a callback once named capabilities become
//! available (or gives up after a time budget). A gated console logger and a few
//! formatting helpers round it out.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   subscribe(event, handler, bound)          require(deps, on_ready, on_timeout)
//!              │                                          │
//!              ▼                                          ▼
//! ┌──────────────────────────────┐      ┌──────────────────────────────────────┐
//! │  EventBus                    │      │  Poller                              │
//! │  - name → [Subscription]     │      │  - Resolve (host-supplied lookup)    │
//! │  - dedup by handler identity │      │  - poll_interval / shared timeout    │
//! │  - synchronous publish       │      │  - one tokio task per pending wait   │
//! └──────────────┬───────────────┘      └───────────────┬──────────────────────┘
//!                │ publish(event, args)                 │ WaitHandle
//!                ▼                                      ▼
//!      h1(args, bound1)                       Ready │ TimedOut │ Cancelled
//!      h2(args)                                          │
//!      ...                                               ▼ (no on_timeout)
//!                                            ┌──────────────────────────┐
//!                                            │  Console ─► LogSink      │
//!                                            │  (gated by host/domains) │
//!                                            └──────────────────────────┘
//! ```
//!
//! ### Publish
//! ```text
//! publish(event, args)
//!   ├─► snapshot subscribers (registry lock released)
//!   ├─► for each subscription, in subscription order:
//!   │      └─ handler(args ++ [bound]) ─ Err / panic ─► recorded as a fault
//!   └─► Ok(delivered) | Err(PublishError::SubscriberFailed { faults, .. })
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types                                  |
//! |-------------------|-----------------------------------------------------------------|--------------------------------------------|
//! | **Events**        | Named pub/sub with identity dedup and bound arguments.          | [`EventBus`], [`Handler`], [`Emitter`]     |
//! | **Dependencies**  | Wait for capabilities with a bounded number of checks.          | [`Poller`], [`Dependencies`], [`Resolve`]  |
//! | **Console**       | Logger gated by hostname, device and explicit switches.         | [`Console`], [`LogSink`]                   |
//! | **Errors**        | Typed errors with stable labels.                                | [`PublishError`], [`HandlerError`]         |
//! | **Configuration** | Poll interval, timeout and console switches in one place.       | [`Config`]                                 |
//! | **Helpers**       | Formatting, version comparison, GUIDs, JSON cache.              | [`format`], [`JsonCache`]                  |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use evoke::{Config, Console, Environment, EventBus, Handler, Poller, WaitOutcome};
//! use serde_json::json;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = EventBus::new();
//!     let seen = Arc::new(AtomicUsize::new(0));
//!     let counter = Arc::clone(&seen);
//!     let on_ready = Handler::infallible(move |args| {
//!         assert_eq!(args[0], json!("app"));
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//!     bus.subscribe("ready", &on_ready, None);
//!
//!     let env = Arc::new(Environment::new());
//!     let poller = Poller::new(&Config::default(), env.clone(), Console::enabled());
//!
//!     let publisher = bus.clone();
//!     let wait = poller.require("app.config", move || {
//!         let _ = publisher.publish("ready", &[json!("app")]);
//!     }, None);
//!
//!     env.set("app.config", json!({ "debug": true }));
//!     assert_eq!(wait.outcome().await, WaitOutcome::Ready);
//!     assert_eq!(seen.load(Ordering::SeqCst), 1);
//!     Ok(())
//! }
//! ```
mod config;
mod console;
mod error;
mod events;
mod requires;
mod util;

pub mod format;

// ---- Public re-exports ----

pub use config::{Config, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
pub use console::{
    Console, ConsoleConfig, DEFAULT_ENABLED_DOMAINS, HostInfo, Level, LogSink, MemorySink,
    TracingSink,
};
pub use error::{ConfigError, FetchError, HandlerError, PublishError, SubscriberFault};
pub use events::{Emitter, EventBus, Handler, HandlerResult};
pub use requires::{
    Callback, Dependencies, Descriptor, Environment, MAX_RESOLVE_DEPTH, Poller, Resolve,
    WaitHandle, WaitId, WaitOutcome, exists, has_dependencies,
};
pub use util::{
    JsonCache, JsonSource, compare_versions, guid, is_blank, is_higher_version, random_int,
};
