use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Global flag to control per-call tracing on the method channel
pub static CALL_TRACE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn per-call tracing on or off
pub fn set_call_tracing(enabled: bool) {
    CALL_TRACE_ENABLED.store(enabled, Ordering::Relaxed);
    tracing::debug!(
        "Method channel call tracing {}",
        if enabled { "ENABLED" } else { "DISABLED" }
    );
}

/// Check if per-call tracing is enabled
pub fn is_call_tracing_enabled() -> bool {
    CALL_TRACE_ENABLED.load(Ordering::Relaxed)
}

/// Install a global fmt subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Returns `false` when the host already installed a subscriber; the host's
/// subscriber is left in place.
pub fn init_tracing(default_filter: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Call trace macro - only logs if call tracing is enabled
#[macro_export]
macro_rules! call_trace {
    ($($arg:tt)*) => {
        if $crate::log::CALL_TRACE_ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
            tracing::debug!($($arg)*);
        }
    };
}
