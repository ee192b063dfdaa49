//! Logging shims that cost nothing unless the `tracing` feature is enabled.
//!
//! With the feature on they forward to the `tracing` crate, so any subscriber the
//! embedding application installs will see node splits and promotions:
//!
//! ```bash
//! RUST_LOG=artree=trace cargo test -p artree --features tracing
//! ```

#![allow(unused_macros)]

/// Trace-level event (per-split detail).
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level event (promotions, whole-tree operations).
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}
