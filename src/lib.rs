//! Peer-support session note generation core.
//!
//! Turns structured session data into an LLM prompt, sends it to a
//! completion provider, and filters the raw output for compliance
//! (peer-support terminology only, no last names) before it reaches
//! the caller. The HTTP layer, persistence, and token issuance live
//! outside this crate.

pub mod config;
pub mod models;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for applications embedding this crate.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate default.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
