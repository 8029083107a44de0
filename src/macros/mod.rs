//! Internal logging shims.
//!
//! Logging goes through `tracing` when the `tracing` feature is enabled (it is
//! by default). With the feature off the macros expand to nothing, and their
//! arguments are not evaluated.

/// Emits a `tracing` event at the given level.
///
/// ```rust,ignore
/// trace_event!(debug, model = %name, errors = count, "validation finished");
/// ```
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!($($arg)+);
        }
    };
}

/// Enters a `debug`-level span for the rest of the enclosing scope.
macro_rules! enter_span {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        let _span = ::tracing::debug_span!($($arg)+).entered();
    };
}

pub(crate) use enter_span;
pub(crate) use trace_event;
