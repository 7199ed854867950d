//! boundary/handoff.rs
//! Copy scratch into an independent buffer, erase scratch, give the copy to the host.
use std::sync::Arc;

use tracing::trace;

use crate::boundary::host::Host;
use crate::buffers::{OutputBuffer, ScratchBuffer};
use crate::telemetry::BoundaryTelemetry;
use crate::types::{BoundaryError, BufferRole};

/// Hand the transform result in `scratch` to `host`.
///
/// Order:
/// 1. allocate the output and copy scratch into it
/// 2. erase scratch, whether or not step 1 succeeded
/// 3. register the one-shot release callback
/// 4. let the host wrap the output
///
/// If 1 fails nothing reaches the host. If 4 fails the output is dropped by
/// the host implementation, which frees it and fires its callback.
///
/// # Errors
/// - `BoundaryError::Allocation` for the output buffer.
/// - `BoundaryError::Handoff` when registration or wrapping fails.
pub fn hand_off<H: Host>(
    host: &H,
    scratch: ScratchBuffer,
    telemetry: &Arc<BoundaryTelemetry>,
) -> Result<H::Value, BoundaryError> {
    let size = scratch.len();
    let copied = OutputBuffer::copy_from(scratch.as_slice());
    scratch.erase();

    let mut output = copied.map_err(|_| BoundaryError::Allocation { buffer: BufferRole::Output, size })?;

    let sink = Arc::clone(telemetry);
    output
        .register_release(Box::new(move |len| {
            sink.record_output_released(len);
            trace!(len, "output buffer released");
        }))
        .map_err(|e| BoundaryError::handoff(e.to_string()))?;
    telemetry.record_output_registered(size);

    host.adopt(output)
}
