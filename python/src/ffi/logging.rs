//! ffi/logging.rs
//! Opt-in stderr logging for the extension module.
use codec_core::constants::env_vars;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_CODEC_LOG`.
///
/// Does nothing when the variable is unset or invalid, or when the process
/// already has a global subscriber.
pub fn init_logging() {
    let Ok(filter) = EnvFilter::try_from_env(env_vars::LOG) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
