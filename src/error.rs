//! Error types used by the event bus, the dependency poller and the helpers.
//!
//! This module defines:
//!
//! - [`HandlerError`]: a failure raised by a single event handler.
//! - [`PublishError`]: returned by `publish` when one or more handlers failed.
//! - [`FetchError`]: raised by a [`JsonSource`](crate::JsonSource) while loading a document.
//! - [`ConfigError`]: invalid configuration input.
//!
//! All types provide `as_label` for logs.

use std::sync::Arc;
use thiserror::Error;

/// # Errors produced by an event handler.
///
/// A handler reports ordinary failures by returning [`HandlerError::Failed`].
/// Panics raised inside a handler are caught by the bus and surfaced as
/// [`HandlerError::Panicked`].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Handler returned an error.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Handler panicked; the payload was captured as text.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic message (or `"unknown panic"` when the payload is not a string).
        info: String,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        HandlerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use evoke::HandlerError;
    ///
    /// let err = HandlerError::failed("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
            HandlerError::Panicked { .. } => "handler_panicked",
        }
    }
}

/// One failed handler invocation inside a publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberFault {
    /// Position of the subscription in the snapshot taken at publish entry.
    pub index: usize,
    /// What went wrong.
    pub error: HandlerError,
}

/// # Errors produced by [`EventBus::publish`](crate::EventBus::publish).
///
/// Every subscriber runs even when an earlier one fails; the faults are
/// collected in invocation order and returned once the publish is complete.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// At least one subscriber failed.
    #[error("{} of {delivered} subscriber(s) failed for event {event:?}; first: {}", .faults.len(), first_fault(.faults))]
    SubscriberFailed {
        /// Event name that was published.
        event: Arc<str>,
        /// Number of subscribers invoked.
        delivered: usize,
        /// Failures in invocation order (never empty).
        faults: Vec<SubscriberFault>,
    },
}

fn first_fault(faults: &[SubscriberFault]) -> String {
    faults
        .first()
        .map(|f| f.error.to_string())
        .unwrap_or_default()
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::SubscriberFailed { .. } => "publish_subscriber_failed",
        }
    }

    /// Returns the faults collected during the publish call.
    pub fn faults(&self) -> &[SubscriberFault] {
        match self {
            PublishError::SubscriberFailed { faults, .. } => faults,
        }
    }
}

/// # Errors produced while loading a JSON document.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source answered with a non-success status.
    #[error("unexpected status {status} for {url}")]
    Status {
        /// Requested location.
        url: String,
        /// Status code returned by the source.
        status: u16,
    },

    /// The body could not be parsed as JSON.
    #[error("invalid json from {url}: {error}")]
    Parse {
        /// Requested location.
        url: String,
        /// Parser message.
        error: String,
    },

    /// Transport-level failure.
    #[error("fetch failed for {url}: {error}")]
    Transport {
        /// Requested location.
        url: String,
        /// Underlying error message.
        error: String,
    },
}

impl FetchError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "fetch_status",
            FetchError::Parse { .. } => "fetch_parse",
            FetchError::Transport { .. } => "fetch_transport",
        }
    }
}

/// # Errors produced by configuration setters.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Timeout text was not a millisecond count.
    #[error("invalid timeout {input:?}: expected milliseconds")]
    InvalidTimeout {
        /// Rejected input.
        input: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::InvalidTimeout { .. } => "config_invalid_timeout",
        }
    }
}
