//! Optional diagnostic sink.
//!
//! The resolver always emits structured `tracing` events. A [`Logger`]
//! additionally receives the same progress messages as plain text, which is
//! handy in tests or when a caller wants the wiring report without
//! installing a subscriber.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use graft_inject::graph::Graph;
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&lines);
//!
//! let graph = Graph::new().with_logger(move |message: core::fmt::Arguments<'_>| {
//!     sink.lock().unwrap().push(message.to_string());
//! });
//! # drop(graph);
//! ```

use core::fmt;

/// Receives human-readable progress messages during resolution.
pub trait Logger: Send + Sync {
    /// Records one message.
    fn trace(&self, message: fmt::Arguments<'_>);
}

impl<F> Logger for F
where
    F: Fn(fmt::Arguments<'_>) + Send + Sync,
{
    fn trace(&self, message: fmt::Arguments<'_>) {
        self(message);
    }
}

/// Emits a message to `tracing` at debug level and to the optional sink.
macro_rules! trace_step {
    ($logger:expr, $($arg:tt)+) => {{
        tracing::debug!($($arg)+);
        if let Some(logger) = $logger {
            $crate::logger::Logger::trace(logger, format_args!($($arg)+));
        }
    }};
}

pub(crate) use trace_step;
