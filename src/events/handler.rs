//! # Identity-comparable event handlers.
//!
//! A [`Handler`] wraps a closure `Fn(&[Value]) -> HandlerResult` in an `Arc`.
//! Two handlers are **the same** iff they share the same allocation: cloning a
//! handler keeps its identity, wrapping the same closure twice does not.
//!
//! ## Example
//! ```rust
//! use evoke::Handler;
//!
//! let a = Handler::infallible(|_args| {});
//! let b = a.clone();
//! let c = Handler::infallible(|_args| {});
//!
//! assert!(a.same(&b));
//! assert!(!a.same(&c));
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use crate::error::HandlerError;

/// Result returned by a handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

type HandlerFn = dyn Fn(&[Value]) -> HandlerResult + Send + Sync + 'static;

/// Shared, identity-comparable event callback.
#[derive(Clone)]
pub struct Handler {
    f: Arc<HandlerFn>,
}

impl Handler {
    /// Wraps a fallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> HandlerResult + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Wraps a closure that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self::new(move |args| {
            f(args);
            Ok(())
        })
    }

    /// Returns `true` if both handles point at the same callback.
    #[inline]
    pub fn same(&self, other: &Handler) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.f), Arc::as_ptr(&other.f))
    }

    /// Invokes the callback, converting a panic into [`HandlerError::Panicked`].
    ///
    /// **Warning**: `AssertUnwindSafe` is used, which can leave shared state
    /// inconsistent if the callback panics while holding a lock.
    pub fn call(&self, args: &[Value]) -> HandlerResult {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.f)(args))) {
            Ok(res) => res,
            Err(payload) => {
                let info = if let Some(msg) = payload.downcast_ref::<&'static str>() {
                    (*msg).to_string()
                } else if let Some(msg) = payload.downcast_ref::<String>() {
                    msg.clone()
                } else {
                    "unknown panic".to_string()
                };
                Err(HandlerError::Panicked { info })
            }
        }
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}
