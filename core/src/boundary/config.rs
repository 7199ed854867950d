//! boundary/config.rs
//! Boundary configuration with defaults and environment overrides.
use tracing::warn;

use crate::compression::{CompressionCodec, registry};
use crate::constants::{DEFAULT_MAX_OUTPUT_SIZE, env_vars};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryConfig {
    /// Engine behind `compress`/`decompress`.
    pub codec: CompressionCodec,

    /// Largest scratch/output allocation a single call may make.
    /// Larger predictions fail size negotiation.
    pub max_output_size: usize,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            codec: CompressionCodec::default(),
            max_output_size: DEFAULT_MAX_OUTPUT_SIZE,
        }
    }
}

impl BoundaryConfig {
    pub fn new(codec: Option<CompressionCodec>, max_output_size: Option<usize>) -> Self {
        let defaults = Self::default();
        Self {
            codec: codec.unwrap_or(defaults.codec),
            max_output_size: max_output_size.unwrap_or(defaults.max_output_size),
        }
    }

    pub fn with_codec(codec: CompressionCodec) -> Self {
        Self::new(Some(codec), None)
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let codec = lookup(env_vars::CODEC).and_then(|raw| match registry::lookup(&raw) {
            Ok(info) => Some(info.codec),
            Err(e) => {
                warn!(var = env_vars::CODEC, error = %e, "ignoring codec override");
                None
            }
        });

        let max_output_size = lookup(env_vars::MAX_OUTPUT).and_then(|raw| match raw.trim().parse::<usize>() {
            Ok(n) => Some(n),
            Err(e) => {
                warn!(var = env_vars::MAX_OUTPUT, value = %raw, error = %e, "ignoring max output override");
                None
            }
        });

        Self::new(codec, max_output_size)
    }
}
