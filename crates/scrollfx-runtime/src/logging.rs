#![forbid(unsafe_code)]

//! Logging setup.
//!
//! The engine and driver emit `tracing` events under the `scrollfx_runtime`
//! and `scrollfx_core` targets:
//!
//! | Level | Event |
//! |-------|-------|
//! | `info` | configuration loaded, geometry measured, driver stopped |
//! | `warn` | degenerate viewport, malformed length fell back to default |
//! | `debug` | update before first measure, driver dropped without stop |
//! | `trace` | every frame |
//!
//! Nothing is printed unless the embedding application installs a
//! subscriber. [`init_json_logging`] installs a JSON one filtered by
//! `RUST_LOG`, defaulting to `info`.

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
