//! Logging infrastructure for structured console output.

mod subscriber;

pub use subscriber::init_subscriber;

/// Target used for stage headers (`==> ...` lines).
pub const STAGE_TARGET: &str = "about::stage";

/// Log a stage header (major step of a command).
pub fn stage(msg: &str) {
    tracing::info!(target: STAGE_TARGET, "{msg}");
}
