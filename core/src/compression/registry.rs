//! compression/registry.rs
//! Codec registry and engine factory.

use crate::compression::codecs::{DeflateEngine, ZstdEngine};
use crate::compression::constants::{DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_ZSTD};
use crate::compression::types::{CodecError, CompressionCodec, TransformEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecInfo {
    pub codec: CompressionCodec,
    pub name: &'static str,
    pub default_level: i32,
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CodecError> {
    let codec = CompressionCodec::try_from(codec_id)
        .map_err(|_| CodecError::UnknownCompression { raw: codec_id })?;
    Ok(info(codec))
}

/// Resolve a codec from its name (`"zstd"`) or numeric id (`"2"`, `"0x0002"`).
pub fn lookup(raw: &str) -> Result<CodecInfo, CodecError> {
    let raw = raw.trim();
    let id = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => raw.parse::<u16>().ok(),
    };
    match id {
        Some(id) => resolve(id),
        None => CompressionCodec::from_name(raw).map(info),
    }
}

pub fn info(codec: CompressionCodec) -> CodecInfo {
    match codec {
        CompressionCodec::Zstd =>
            CodecInfo { codec, name: "zstd", default_level: DEFAULT_LEVEL_ZSTD },
        CompressionCodec::Deflate =>
            CodecInfo { codec, name: "deflate", default_level: DEFAULT_LEVEL_DEFLATE as i32 },
    }
}

/// Engine for `codec` at its registered default level.
pub fn create_engine(codec: CompressionCodec) -> Box<dyn TransformEngine> {
    let level = info(codec).default_level;
    match codec {
        CompressionCodec::Zstd    => Box::new(ZstdEngine::with_level(level)),
        CompressionCodec::Deflate => Box::new(DeflateEngine::with_level(level.unsigned_abs())),
    }
}
