//! boundary/negotiate.rs
//! Ask the engine for the exact output size before anything is allocated.
use tracing::trace;

use crate::buffers::ByteView;
use crate::compression::{OperationKind, SizePrediction, TransformEngine};
use crate::types::BoundaryError;

/// Exact output size for `op` on `view`, bounded by `limit`.
///
/// # Errors
/// - `BoundaryError::SizeComputation` when the engine reports `Invalid` or the
///   prediction exceeds `limit`. Not retried.
pub fn negotiate_size<E: TransformEngine + ?Sized>(
    engine: &E,
    op: OperationKind,
    view: ByteView<'_>,
    limit: usize,
) -> Result<usize, BoundaryError> {
    let reason = match engine.predict(op, view.as_slice()) {
        SizePrediction::Bytes(size) if size <= limit => {
            trace!(%op, engine = engine.name(), input_len = view.len(), size, "size negotiated");
            return Ok(size);
        }
        SizePrediction::Bytes(size) => format!("predicted {size} bytes exceeds limit of {limit}"),
        SizePrediction::Invalid => "engine reported invalid size".to_string(),
    };
    Err(BoundaryError::SizeComputation {
        op,
        engine: engine.name(),
        input_len: view.len(),
        reason,
    })
}
