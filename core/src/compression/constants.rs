/// Stable codec IDs (u16) for configuration and the registry.
pub mod codec_ids {
    pub const ZSTD: u16    = 0x0001;
    pub const DEFLATE: u16 = 0x0002;
}

/// Fixed compression levels. Not exposed to the host.
pub const DEFAULT_LEVEL_ZSTD: i32 = 6;
pub const DEFAULT_LEVEL_DEFLATE: u32 = 6;

/// Zstd: largest decoded block, and the size of a block header. A frame of
/// `n` bytes holds at most `n / 3` blocks, which bounds what it can decode to.
pub const ZSTD_BLOCK_SIZE_MAX: usize = 128 * 1024;
pub const ZSTD_BLOCK_HEADER: usize = 3;

/// Deflate frame: u32 LE original length prefix.
pub const DEFLATE_LEN_PREFIX: usize = 4;
/// Deflate frame: u32 LE CRC32 suffix.
pub const DEFLATE_CRC_SUFFIX: usize = 4;
/// Total framing bytes around the zlib stream.
pub const DEFLATE_FRAME_OVERHEAD: usize = DEFLATE_LEN_PREFIX + DEFLATE_CRC_SUFFIX;

/// Deflate cannot expand a stream by more than 1032:1.
pub const DEFLATE_MAX_RATIO: usize = 1032;
