//! Log subscriber setup.
//!
//! The crate only emits `tracing` events; applications that already install
//! a subscriber need nothing from here.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string,
/// e.g. `GLIDE_LOG=glide_client=debug`.
pub const LOG_ENV: &str = "GLIDE_LOG";

/// Install a formatting subscriber filtered by `GLIDE_LOG`, falling back to
/// `default_level` when the variable is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed; calling
/// this more than once is harmless.
pub fn init(default_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_target(true)
        .try_init()
        .is_ok()
}

fn filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(default_level.into()))
}

// ── Tests ──────────────────────────────────────────────────────────
