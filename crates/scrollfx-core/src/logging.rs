#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros used by the crate. Without it, the same macro names are exported
//! at the crate root as no-ops so call sites compile unchanged.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    /// No-op `warn!` used when the `tracing` feature is disabled.
    #[macro_export]
    #[doc(hidden)]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op `debug!` used when the `tracing` feature is disabled.
    #[macro_export]
    #[doc(hidden)]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op `trace!` used when the `tracing` feature is disabled.
    #[macro_export]
    #[doc(hidden)]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
