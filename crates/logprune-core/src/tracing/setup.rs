//! Subscriber installation.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `LOGPRUNE_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "logprune_core=info";

/// Install the global fmt subscriber.
///
/// Reads `LOGPRUNE_LOG` with `EnvFilter` syntax, e.g.
/// `LOGPRUNE_LOG=logprune_core::walker=debug,logprune_core::actions=info`.
/// Falls back to [`DEFAULT_FILTER`].
///
/// Idempotent. If the host application already installed a global subscriber,
/// that one is kept.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("LOGPRUNE_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
