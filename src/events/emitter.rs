//! # Pre-bound publisher for one event name.
//!
//! An [`Emitter`] is the closure form of [`EventBus::publish`]: calling
//! [`Emitter::emit`] with some arguments is equivalent to publishing them under
//! the emitter's event name. It holds no state besides the bus handle and the name.
//!
//! ## Example
//! ```rust
//! use evoke::{EventBus, Handler};
//! use serde_json::json;
//!
//! let bus = EventBus::new();
//! bus.subscribe("saved", &Handler::infallible(|args| assert_eq!(args[0], json!(7))), None);
//!
//! let saved = bus.emitter("saved");
//! assert_eq!(saved.emit(&[json!(7)]).unwrap(), 1);
//! ```

use std::sync::Arc;

use serde_json::Value;

use super::bus::EventBus;
use super::handler::Handler;
use crate::error::{HandlerError, PublishError};

/// Publishes to a fixed event name.
#[derive(Clone, Debug)]
pub struct Emitter {
    bus: EventBus,
    event: Arc<str>,
}

impl Emitter {
    pub(crate) fn new(bus: EventBus, event: Arc<str>) -> Self {
        Self { bus, event }
    }

    /// Event name this emitter publishes to.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Equivalent to `bus.publish(self.event(), args)`.
    pub fn emit(&self, args: &[Value]) -> Result<usize, PublishError> {
        self.bus.publish(&self.event, args)
    }

    /// Turns the emitter into a [`Handler`] that re-publishes whatever it receives.
    ///
    /// Useful to forward one event into another. A downstream failure surfaces as
    /// [`HandlerError::Failed`] on the upstream publish.
    pub fn to_handler(&self) -> Handler {
        let this = self.clone();
        Handler::new(move |args| {
            this.emit(args)
                .map(|_| ())
                .map_err(|e| HandlerError::failed(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn emit_is_publish() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        bus.subscribe(
            "tick",
            &Handler::infallible(move |args| s.lock().unwrap().extend_from_slice(args)),
            Some(json!("bound")),
        );

        let tick = bus.emitter("tick");
        assert_eq!(tick.event(), "tick");
        tick.emit(&[json!(1)]).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![json!(1), json!("bound")]);
    }

    #[test]
    fn forwarding_handler_chains_events() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        bus.subscribe(
            "b",
            &Handler::infallible(move |args| s.lock().unwrap().extend_from_slice(args)),
            None,
        );
        bus.subscribe("a", &bus.emitter("b").to_handler(), Some(json!("via-a")));

        bus.publish("a", &[json!(1)]).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![json!(1), json!("via-a")]);
    }

    #[test]
    fn forwarding_handler_reports_downstream_failure() {
        let bus = EventBus::new();
        bus.subscribe("b", &Handler::new(|_| Err(HandlerError::failed("no"))), None);
        bus.subscribe("a", &bus.emitter("b").to_handler(), None);

        let err = bus.publish("a", &[]).unwrap_err();
        assert_eq!(err.faults()[0].error.as_label(), "handler_failed");
    }
}
