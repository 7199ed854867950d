/// Upper bound on any single scratch/output allocation (1 GiB).
/// A size prediction above this is treated as unrepresentable.
pub const DEFAULT_MAX_OUTPUT_SIZE: usize = 1024 * 1024 * 1024;

/// Environment variables read by `BoundaryConfig::from_env`.
pub mod env_vars {
    pub const CODEC: &str      = "RUST_CODEC_CODEC";
    pub const MAX_OUTPUT: &str = "RUST_CODEC_MAX_OUTPUT";
    pub const LOG: &str        = "RUST_CODEC_LOG";
}
