//! src/compression/codecs/zstd.rs
//!
//! Zstd transform engine.
//!
//! Design notes:
//! - Output is exactly one zstd frame carrying the pledged content size and a
//!   content checksum, so the decompressed size is readable from the header.
//! - Size prediction runs the same encoder configuration into a counting sink;
//!   the fill step runs it into the exact-sized destination. Same parameters,
//!   same input, same bytes.
//! - Decompression accepts a single complete data frame only. Trailing bytes,
//!   skippable frames and unknown content sizes are `Invalid`, as is a
//!   declared content size the frame's blocks could not produce.
use std::io::{self, Write};

use tracing::debug;

use crate::compression::constants::{DEFAULT_LEVEL_ZSTD, ZSTD_BLOCK_HEADER, ZSTD_BLOCK_SIZE_MAX};
use crate::compression::types::{SizePrediction, TransformEngine};
use crate::utils::CountingSink;

const CODEC: &str = "zstd";

/// Zstd engine. Stateless; a fresh encoder/decoder context is built per call.
#[derive(Debug, Clone, Copy)]
pub struct ZstdEngine {
    level: i32,
}

impl Default for ZstdEngine {
    fn default() -> Self {
        Self { level: DEFAULT_LEVEL_ZSTD }
    }
}

impl ZstdEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: i32) -> Self {
        Self { level }
    }

    /// Run the frame encoder over `src` into `sink`.
    fn encode<W: Write>(&self, sink: W, src: &[u8]) -> io::Result<W> {
        let mut encoder = zstd::stream::Encoder::new(sink, self.level)?;
        encoder.include_checksum(true)?;
        encoder.include_contentsize(true)?;
        encoder.set_pledged_src_size(Some(src.len() as u64))?;
        encoder.write_all(src)?;
        encoder.finish()
    }
}

impl TransformEngine for ZstdEngine {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn compressed_size(&self, src: &[u8]) -> SizePrediction {
        match self.encode(CountingSink::new(), src) {
            Ok(sink) => SizePrediction::Bytes(sink.written()),
            Err(e) => {
                debug!(codec = CODEC, error = %e, "compressed size prediction failed");
                SizePrediction::Invalid
            }
        }
    }

    fn compress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        match self.encode(dst, src) {
            // The writer is the unfilled tail of `dst`.
            Ok(rest) => rest.is_empty(),
            Err(e) => {
                debug!(codec = CODEC, error = %e, "compress fill failed");
                false
            }
        }
    }

    fn decompressed_size(&self, src: &[u8]) -> SizePrediction {
        match src.get(..4).map(|m| u32::from_le_bytes([m[0], m[1], m[2], m[3]])) {
            Some(zstd_safe::MAGICNUMBER) => {}
            Some(magic) => {
                debug!(codec = CODEC, magic, "not a zstd data frame");
                return SizePrediction::Invalid;
            }
            None => {
                debug!(codec = CODEC, input_len = src.len(), "input shorter than frame magic");
                return SizePrediction::Invalid;
            }
        }

        match zstd_safe::find_frame_compressed_size(src) {
            Ok(frame_len) if frame_len == src.len() => {}
            Ok(frame_len) => {
                debug!(codec = CODEC, frame_len, input_len = src.len(), "input is not exactly one frame");
                return SizePrediction::Invalid;
            }
            Err(code) => {
                debug!(codec = CODEC, code, "malformed frame");
                return SizePrediction::Invalid;
            }
        }

        let size = match zstd_safe::get_frame_content_size(src) {
            Ok(Some(size)) => size,
            Ok(None) => {
                debug!(codec = CODEC, "frame does not record its content size");
                return SizePrediction::Invalid;
            }
            Err(_) => {
                debug!(codec = CODEC, "frame header unreadable");
                return SizePrediction::Invalid;
            }
        };

        // The header is not trusted beyond what the blocks can produce.
        let bound = (src.len() / ZSTD_BLOCK_HEADER).saturating_mul(ZSTD_BLOCK_SIZE_MAX);
        match usize::try_from(size) {
            Ok(size) if size <= bound => SizePrediction::Bytes(size),
            _ => {
                debug!(codec = CODEC, declared = size, bound, "content size exceeds what the frame can hold");
                SizePrediction::Invalid
            }
        }
    }

    fn decompress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        let expected = dst.len();
        match zstd::bulk::decompress_to_buffer(src, dst) {
            Ok(n) if n == expected => true,
            Ok(n) => {
                debug!(codec = CODEC, produced = n, expected, "decompressed size mismatch");
                false
            }
            Err(e) => {
                debug!(codec = CODEC, error = %e, "decompress fill failed");
                false
            }
        }
    }
}
