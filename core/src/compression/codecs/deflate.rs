//! Deflate (zlib wrapper) via flate2, framed for size negotiation.
//!
//! Frame layout: `[u32 LE original length][zlib stream][u32 LE CRC32 of original]`.
//! The length prefix is only trusted up to deflate's maximum expansion of the body.

use std::io::{self, Read, Write};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use tracing::debug;

use crate::compression::constants::{
    DEFAULT_LEVEL_DEFLATE, DEFLATE_CRC_SUFFIX, DEFLATE_FRAME_OVERHEAD, DEFLATE_LEN_PREFIX,
    DEFLATE_MAX_RATIO,
};
use crate::compression::types::{SizePrediction, TransformEngine};
use crate::utils::{CountingSink, compute_checksum, verify_checksum};

const CODEC: &str = "deflate";

#[derive(Debug, Clone, Copy)]
pub struct DeflateEngine {
    level: Compression,
}

impl Default for DeflateEngine {
    fn default() -> Self {
        Self { level: Compression::new(DEFAULT_LEVEL_DEFLATE) }
    }
}

impl DeflateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: u32) -> Self {
        Self { level: Compression::new(level) }
    }

    fn encode<W: Write>(&self, sink: W, src: &[u8]) -> io::Result<W> {
        let mut enc = ZlibEncoder::new(sink, self.level);
        enc.write_all(src)?;
        enc.finish()
    }

    fn decode(compressed: &[u8], dst: &mut [u8]) -> io::Result<()> {
        let mut dec = ZlibDecoder::new(compressed);
        dec.read_exact(dst)?;

        // Stream must end exactly here; this also forces the adler32 check.
        let mut probe = [0u8; 1];
        if dec.read(&mut probe)? != 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "stream longer than length prefix"));
        }
        if dec.total_in() != compressed.len() as u64 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "trailing bytes after zlib stream"));
        }
        Ok(())
    }
}

impl TransformEngine for DeflateEngine {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn compressed_size(&self, src: &[u8]) -> SizePrediction {
        if u32::try_from(src.len()).is_err() {
            debug!(codec = CODEC, input_len = src.len(), "input exceeds u32 length prefix");
            return SizePrediction::Invalid;
        }
        match self.encode(CountingSink::new(), src) {
            Ok(sink) => sink.written().checked_add(DEFLATE_FRAME_OVERHEAD).into(),
            Err(e) => {
                debug!(codec = CODEC, error = %e, "compressed size prediction failed");
                SizePrediction::Invalid
            }
        }
    }

    fn compress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        let Ok(orig_len) = u32::try_from(src.len()) else {
            return false;
        };
        if dst.len() < DEFLATE_FRAME_OVERHEAD {
            return false;
        }

        let body_end = dst.len() - DEFLATE_CRC_SUFFIX;
        let (head, crc) = dst.split_at_mut(body_end);
        let (prefix, body) = head.split_at_mut(DEFLATE_LEN_PREFIX);

        prefix.copy_from_slice(&orig_len.to_le_bytes());
        match self.encode(body, src) {
            Ok(rest) if rest.is_empty() => {}
            Ok(rest) => {
                debug!(codec = CODEC, unfilled = rest.len(), "compressed body shorter than negotiated");
                return false;
            }
            Err(e) => {
                debug!(codec = CODEC, error = %e, "compress fill failed");
                return false;
            }
        }
        crc.copy_from_slice(&compute_checksum(src).to_le_bytes());
        true
    }

    fn decompressed_size(&self, src: &[u8]) -> SizePrediction {
        if src.len() < DEFLATE_FRAME_OVERHEAD {
            debug!(codec = CODEC, input_len = src.len(), "input too short for length+checksum");
            return SizePrediction::Invalid;
        }
        let mut prefix = [0u8; DEFLATE_LEN_PREFIX];
        prefix.copy_from_slice(&src[..DEFLATE_LEN_PREFIX]);
        let declared = u32::from_le_bytes(prefix);

        let bound = (src.len() - DEFLATE_FRAME_OVERHEAD).saturating_mul(DEFLATE_MAX_RATIO);
        match usize::try_from(declared) {
            Ok(size) if size <= bound => SizePrediction::Bytes(size),
            _ => {
                debug!(codec = CODEC, declared, bound, "length prefix exceeds what the body can inflate to");
                SizePrediction::Invalid
            }
        }
    }

    fn decompress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        if src.len() < DEFLATE_FRAME_OVERHEAD {
            return false;
        }
        let body_end = src.len() - DEFLATE_CRC_SUFFIX;
        let compressed = &src[DEFLATE_LEN_PREFIX..body_end];
        let mut crc = [0u8; DEFLATE_CRC_SUFFIX];
        crc.copy_from_slice(&src[body_end..]);

        if let Err(e) = Self::decode(compressed, dst) {
            debug!(codec = CODEC, error = %e, "decompress fill failed");
            return false;
        }

        let expected = u32::from_le_bytes(crc);
        let actual = compute_checksum(dst);
        if !verify_checksum(expected, actual) {
            debug!(codec = CODEC, expected, actual, "checksum mismatch");
            return false;
        }
        true
    }
}
