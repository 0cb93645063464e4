//! Dependency polling.
//!
//! This module answers "is X available yet?" and turns late availability into a
//! callback with a bounded number of retries.
//!
//! ## Contents
//! - [`Descriptor`], [`Dependencies`] what to wait for
//! - [`exists`], [`has_dependencies`] the availability predicate
//! - [`Resolve`], [`Environment`] path lookup supplied by the host
//! - [`Poller`] runs waits on the tokio runtime
//! - [`WaitHandle`], [`WaitId`], [`WaitOutcome`] one logical wait
//!
//! ## Quick wiring
//! ```text
//! Poller::new(&Config, Arc<dyn Resolve>, Console)
//!      └─► require(deps, on_ready, on_timeout) ─► WaitHandle
//!             └─► has_dependencies(deps) ─► exists(d) ─► Resolve::resolve(path)
//! ```

mod descriptor;
mod poller;
mod resolver;
mod wait;

pub use descriptor::{Dependencies, Descriptor, MAX_RESOLVE_DEPTH, exists, has_dependencies};
pub use poller::{Callback, Poller};
pub use resolver::{Environment, Resolve};
pub use wait::{WaitHandle, WaitId, WaitOutcome};
