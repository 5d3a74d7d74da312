//! Tracing subscriber setup.
//!
//! Only installed in debug mode, where the `msg_*` macros emit `tracing`
//! events instead of printing. `RUST_LOG` takes precedence over the default
//! filter.

use super::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "moodlog=debug";

pub fn init() {
    if !is_debug_mode() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A subscriber may already be set (tests); keep the first one.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
