//! codec-core
//!
//! Compress/decompress boundary for managed hosts.
//! No Python, no PyO3, no FFI: hosts plug in through `boundary::Host`.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod buffers;
pub mod compression;
pub mod telemetry;

// Call orchestration
pub mod boundary;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::boundary::{Boundary, BoundaryConfig, BufferShape, Host, check_shape};
    pub use crate::buffers::{ByteView, OutputBuffer};
    pub use crate::compression::{CompressionCodec, OperationKind, SizePrediction, TransformEngine};
    pub use crate::types::{BoundaryError, FailureKind};
}
