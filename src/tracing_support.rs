//! Tracing support for diagnostics.
//!
//! This module re-exports the `tracing` macros used by the crate when the
//! `tracing` feature is enabled, and provides no-op replacements when it's
//! disabled, so call sites never need their own `cfg` attributes.

#[cfg(feature = "tracing")]
mod enabled {
    use std::sync::Once;

    /// Installs a formatting subscriber that writes through the test harness.
    /// Safe to call any number of times; only the first call has an effect,
    /// and an already-installed global subscriber is left alone.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(tracing::Level::DEBUG)
                .try_init();
        });
    }
}

#[cfg(feature = "tracing")]
pub use enabled::init_tracing;

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, debug_span, trace};

#[cfg(not(feature = "tracing"))]
mod disabled {
    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(not(feature = "tracing"))]
pub use disabled::{NoOpSpan, NoOpSpanGuard, init_tracing};

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_span {
    ($($tt:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {debug, debug_span, trace};
