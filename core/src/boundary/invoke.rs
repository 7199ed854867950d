//! boundary/invoke.rs
//! Run the engine into a scratch buffer of exactly the negotiated size.
use std::sync::Arc;

use crate::buffers::{ByteView, ScratchBuffer};
use crate::compression::{OperationKind, TransformEngine};
use crate::telemetry::BoundaryTelemetry;
use crate::types::{BoundaryError, BufferRole};

/// Allocate `size` bytes of scratch and fill it with `op` applied to `view`.
///
/// On any error the scratch buffer is dropped here, which erases it.
///
/// # Errors
/// - `BoundaryError::Allocation` when the scratch buffer cannot be reserved.
/// - `BoundaryError::Transform` when the engine's fill step reports failure.
pub fn invoke_transform<E: TransformEngine + ?Sized>(
    engine: &E,
    op: OperationKind,
    view: ByteView<'_>,
    size: usize,
    telemetry: &Arc<BoundaryTelemetry>,
) -> Result<ScratchBuffer, BoundaryError> {
    let mut scratch = ScratchBuffer::allocate(size)
        .map_err(|_| BoundaryError::Allocation { buffer: BufferRole::Scratch, size })?
        .track(Arc::clone(telemetry));
    debug_assert_eq!(scratch.len(), size);

    if !engine.perform(op, scratch.as_mut_slice(), view.as_slice()) {
        return Err(BoundaryError::Transform {
            op,
            engine: engine.name(),
            reason: format!("fill step failed for {} negotiated bytes", size),
        });
    }
    Ok(scratch)
}
