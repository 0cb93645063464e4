//! Named events: handlers, registry and emitters.
//!
//! This module groups the in-process **event registry** and the types used to
//! subscribe to it and publish through it.
//!
//! ## Contents
//! - [`Handler`] identity-comparable callback (`Arc`'d closure)
//! - [`EventBus`] name → ordered subscriptions, synchronous publish
//! - [`Emitter`] publisher pre-bound to one event name
//!
//! ## Quick reference
//! ```text
//! bus.subscribe("ready", &h, Some(bound))
//! bus.publish("ready", &[a, b])   ──► h(a, b, bound)
//! bus.emitter("ready").emit(&[a]) ──► same as publish("ready", &[a])
//! ```

mod bus;
mod emitter;
mod handler;

pub use bus::EventBus;
pub use emitter::Emitter;
pub use handler::{Handler, HandlerResult};
