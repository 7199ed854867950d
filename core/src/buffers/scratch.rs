//! buffers/scratch.rs
//! Exact-sized, heap-backed transform target.
//!
//! Summary: allocated fallibly at the negotiated size, wiped with a
//! non-elidable write (`zeroize`) whenever it is dropped, on every exit path
//! including unwinding.
use std::collections::TryReserveError;
use std::fmt;
use std::sync::Arc;

use tracing::trace;
use zeroize::Zeroize;

use crate::telemetry::BoundaryTelemetry;

pub struct ScratchBuffer {
    bytes: Vec<u8>,
    telemetry: Option<Arc<BoundaryTelemetry>>,
}

impl ScratchBuffer {
    /// Allocate exactly `len` zeroed bytes on the heap.
    ///
    /// # Errors
    /// - Returns the allocator error instead of aborting when `len` cannot be reserved.
    pub fn allocate(len: usize) -> Result<Self, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len)?;
        bytes.resize(len, 0);
        Ok(Self { bytes, telemetry: None })
    }

    /// Attach a telemetry sink; records the allocation now and the erase on drop.
    pub fn track(mut self, telemetry: Arc<BoundaryTelemetry>) -> Self {
        telemetry.record_scratch_allocated(self.bytes.len());
        self.telemetry = Some(telemetry);
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Zero every byte in place. The length is kept.
    pub fn wipe(&mut self) {
        self.bytes.as_mut_slice().zeroize();
    }

    /// Erase and release the buffer now.
    pub fn erase(self) {
        drop(self);
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        let len = self.bytes.len();
        // Zeroes the full capacity, not just `len`.
        self.bytes.zeroize();
        if let Some(telemetry) = self.telemetry.take() {
            telemetry.record_scratch_wiped(len);
        }
        trace!(len, "scratch buffer erased");
    }
}

impl fmt::Debug for ScratchBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print transform output.
        f.debug_struct("ScratchBuffer").field("len", &self.bytes.len()).finish()
    }
}
