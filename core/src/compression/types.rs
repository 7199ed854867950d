//! compression/types.rs
//! Codec identifiers, size predictions and the transform engine seam.
use std::fmt;
use num_enum::TryFromPrimitive;

use crate::compression::constants::codec_ids;
use crate::utils::enum_name_or_hex;

/// FFI-safe enum for compression codec identifiers.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CompressionCodec {
    Zstd    = codec_ids::ZSTD,
    Deflate = codec_ids::DEFLATE,
}

impl CompressionCodec {
    /// Parse a codec from its lowercase name (`"zstd"`, `"deflate"`).
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "zstd"    => Ok(CompressionCodec::Zstd),
            "deflate" => Ok(CompressionCodec::Deflate),
            _ => Err(CodecError::UnknownName { name: name.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionCodec::Zstd    => "zstd",
            CompressionCodec::Deflate => "deflate",
        }
    }
}

impl Default for CompressionCodec {
    fn default() -> Self {
        CompressionCodec::Zstd
    }
}

fn codec_label(raw: &u16) -> String {
    enum_name_or_hex::<CompressionCodec>(*raw)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unknown compression codec: {}", codec_label(.raw))]
    UnknownCompression { raw: u16 },
    #[error("unknown compression codec name: {name:?}")]
    UnknownName { name: String },
}

/// Direction of a transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Compress,
    Decompress,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Compress   => "compress",
            OperationKind::Decompress => "decompress",
        };
        f.write_str(name)
    }
}

/// Output size negotiated with an engine before any allocation.
///
/// `Invalid` is distinct from every legal size, including zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SizePrediction {
    Bytes(usize),
    Invalid,
}

impl SizePrediction {
    pub fn bytes(self) -> Option<usize> {
        match self {
            SizePrediction::Bytes(n) => Some(n),
            SizePrediction::Invalid  => None,
        }
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, SizePrediction::Invalid)
    }
}

impl From<Option<usize>> for SizePrediction {
    fn from(value: Option<usize>) -> Self {
        value.map_or(SizePrediction::Invalid, SizePrediction::Bytes)
    }
}

/// Two-phase negotiate-then-fill transform.
///
/// The `*_size` methods must return exactly the number of bytes the matching
/// `*_into` call writes for the same input. The `*_into` methods receive a
/// destination of exactly that length and report success as a boolean; they
/// must not write past `dst`.
///
/// Engines are shared across host threads, hence `Send + Sync`.
pub trait TransformEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn compressed_size(&self, src: &[u8]) -> SizePrediction;

    fn compress_into(&self, dst: &mut [u8], src: &[u8]) -> bool;

    fn decompressed_size(&self, src: &[u8]) -> SizePrediction;

    fn decompress_into(&self, dst: &mut [u8], src: &[u8]) -> bool;

    /// Size-prediction entry point for `op`.
    fn predict(&self, op: OperationKind, src: &[u8]) -> SizePrediction {
        match op {
            OperationKind::Compress   => self.compressed_size(src),
            OperationKind::Decompress => self.decompressed_size(src),
        }
    }

    /// Fill entry point for `op`.
    fn perform(&self, op: OperationKind, dst: &mut [u8], src: &[u8]) -> bool {
        match op {
            OperationKind::Compress   => self.compress_into(dst, src),
            OperationKind::Decompress => self.decompress_into(dst, src),
        }
    }
}

impl<E: TransformEngine + ?Sized> TransformEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn compressed_size(&self, src: &[u8]) -> SizePrediction {
        (**self).compressed_size(src)
    }
    fn compress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        (**self).compress_into(dst, src)
    }
    fn decompressed_size(&self, src: &[u8]) -> SizePrediction {
        (**self).decompressed_size(src)
    }
    fn decompress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        (**self).decompress_into(dst, src)
    }
}
