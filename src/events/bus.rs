//! # Named-event registry with synchronous delivery.
//!
//! [`EventBus`] maps an event name to an ordered list of subscriptions and delivers
//! published arguments to them on the publisher's own call stack.
//!
//! ## Architecture
//! ```text
//! subscribe(name, handler, bound) ──► registry[name].push(Subscription)
//!
//! publish(name, args)
//!     ├─► snapshot = registry[name].clone()   (read lock, released immediately)
//!     ├─► for sub in snapshot (registration order):
//!     │       sub.handler.call(args ++ [sub.bound])
//!     │           └─► Err / panic → recorded, next subscriber still runs
//!     └─► faults? → Err(PublishError::SubscriberFailed) : Ok(delivered)
//! ```
//!
//! ## Rules
//! - **Dedup by identity**: one subscription per (name, handler) pair.
//! - **Snapshot at entry**: handlers added during a publish are not called by it;
//!   handlers removed during a publish still are.
//! - **No lock held while calling**: handlers may re-enter the bus.
//! - **Fault isolation**: a failing or panicking handler is reported, never removed.
//! - **No persistence**: publishing a name nobody listens to is a no-op.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::emitter::Emitter;
use super::handler::Handler;
use crate::error::{PublishError, SubscriberFault};

/// One registered handler with its optional bound argument.
#[derive(Clone, Debug)]
struct Subscription {
    handler: Handler,
    bound: Option<Value>,
}

impl Subscription {
    /// Published arguments followed by the bound argument (skipped when `null`).
    fn arguments(&self, args: &[Value]) -> Vec<Value> {
        let mut out = Vec::with_capacity(args.len() + 1);
        out.extend_from_slice(args);
        match &self.bound {
            Some(Value::Null) | None => {}
            Some(bound) => out.push(bound.clone()),
        }
        out
    }
}

type Registry = HashMap<Arc<str>, Vec<Subscription>>;

/// In-process event registry.
///
/// ### Properties
/// - **Synchronous**: `publish()` returns after every subscriber ran.
/// - **Ordered**: subscribers run in registration order.
/// - **Cloneable**: cheap to clone; clones share one registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `event`.
    ///
    /// `bound` is appended as a final extra argument to every invocation of this
    /// subscription (unless it is JSON `null`). Re-registering a handler that is
    /// already subscribed to `event` is a no-op, and the first bound argument
    /// is kept.
    pub fn subscribe(&self, event: &str, handler: &Handler, bound: Option<Value>) {
        let mut registry = self.write();
        let subs = registry.entry(Arc::from(event)).or_default();
        if subs.iter().any(|s| s.handler.same(handler)) {
            return;
        }
        subs.push(Subscription {
            handler: handler.clone(),
            bound,
        });
        tracing::trace!(event, subscribers = subs.len(), "subscribed");
    }

    /// Removes `handler` from `event`.
    ///
    /// No-op when the event is unknown or the handler is not registered under it.
    pub fn unsubscribe(&self, event: &str, handler: &Handler) {
        let mut registry = self.write();
        if let Some(subs) = registry.get_mut(event) {
            subs.retain(|s| !s.handler.same(handler));
            if subs.is_empty() {
                registry.remove(event);
            }
        }
    }

    /// Publishes `args` to every subscriber of `event`.
    ///
    /// Returns the number of subscribers invoked. When one or more subscribers
    /// fail, the remaining ones still run and the faults are returned together.
    pub fn publish(&self, event: &str, args: &[Value]) -> Result<usize, PublishError> {
        let snapshot: Vec<Subscription> = match self.read().get(event) {
            Some(subs) => subs.clone(),
            None => return Ok(0),
        };

        let mut faults = Vec::new();
        for (index, sub) in snapshot.iter().enumerate() {
            if let Err(error) = sub.handler.call(&sub.arguments(args)) {
                tracing::warn!(event, index, error = %error, "subscriber failed");
                faults.push(SubscriberFault { index, error });
            }
        }

        if faults.is_empty() {
            Ok(snapshot.len())
        } else {
            Err(PublishError::SubscriberFailed {
                event: Arc::from(event),
                delivered: snapshot.len(),
                faults,
            })
        }
    }

    /// Returns an [`Emitter`] that publishes to `event` on this bus.
    pub fn emitter(&self, event: &str) -> Emitter {
        Emitter::new(self.clone(), Arc::from(event))
    }

    /// Number of subscriptions currently registered under `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.read().get(event).map_or(0, Vec::len)
    }

    /// Returns `true` if `handler` is registered under `event`.
    pub fn is_subscribed(&self, event: &str, handler: &Handler) -> bool {
        self.read()
            .get(event)
            .is_some_and(|subs| subs.iter().any(|s| s.handler.same(handler)))
    }

    /// Returns sorted list of event names that have at least one subscriber.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().map(|k| k.to_string()).collect();
        names.sort_unstable();
        names
    }

    // Handlers never run under the lock, so a poisoned lock still holds a
    // consistent registry.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.event_names())
            .finish()
    }
}
