//! telemetry/counters.rs
//! Live counters updated during boundary calls and buffer release.
use std::sync::atomic::{AtomicU64, Ordering};

use crate::compression::OperationKind;
use crate::telemetry::snapshot::TelemetrySnapshot;
use crate::types::FailureKind;

#[derive(Debug, Default)]
pub struct BoundaryTelemetry {
    compress_calls: AtomicU64,
    decompress_calls: AtomicU64,
    validation_failures: AtomicU64,
    size_failures: AtomicU64,
    allocation_failures: AtomicU64,
    transform_failures: AtomicU64,
    handoff_failures: AtomicU64,
    scratch_allocated: AtomicU64,
    scratch_wiped: AtomicU64,
    scratch_bytes_wiped: AtomicU64,
    outputs_registered: AtomicU64,
    outputs_released: AtomicU64,
    bytes_in: AtomicU64,
    bytes_out: AtomicU64,
}

fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}

impl BoundaryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_call(&self, op: OperationKind) {
        match op {
            OperationKind::Compress   => bump(&self.compress_calls, 1),
            OperationKind::Decompress => bump(&self.decompress_calls, 1),
        }
    }

    pub fn record_input(&self, len: usize) {
        bump(&self.bytes_in, len as u64);
    }

    pub fn record_failure(&self, kind: FailureKind) {
        let counter = match kind {
            FailureKind::Validation      => &self.validation_failures,
            FailureKind::SizeComputation => &self.size_failures,
            FailureKind::Allocation      => &self.allocation_failures,
            FailureKind::Transform       => &self.transform_failures,
            FailureKind::Handoff         => &self.handoff_failures,
        };
        bump(counter, 1);
    }

    pub fn record_scratch_allocated(&self, _len: usize) {
        bump(&self.scratch_allocated, 1);
    }

    pub fn record_scratch_wiped(&self, len: usize) {
        bump(&self.scratch_wiped, 1);
        bump(&self.scratch_bytes_wiped, len as u64);
    }

    /// A release callback was attached to an output about to be wrapped.
    pub fn record_output_registered(&self, len: usize) {
        bump(&self.outputs_registered, 1);
        bump(&self.bytes_out, len as u64);
    }

    /// The release callback of an output ran.
    pub fn record_output_released(&self, _len: usize) {
        bump(&self.outputs_released, 1);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        TelemetrySnapshot {
            compress_calls: load(&self.compress_calls),
            decompress_calls: load(&self.decompress_calls),
            validation_failures: load(&self.validation_failures),
            size_failures: load(&self.size_failures),
            allocation_failures: load(&self.allocation_failures),
            transform_failures: load(&self.transform_failures),
            handoff_failures: load(&self.handoff_failures),
            scratch_allocated: load(&self.scratch_allocated),
            scratch_wiped: load(&self.scratch_wiped),
            scratch_bytes_wiped: load(&self.scratch_bytes_wiped),
            outputs_registered: load(&self.outputs_registered),
            outputs_released: load(&self.outputs_released),
            bytes_in: load(&self.bytes_in),
            bytes_out: load(&self.bytes_out),
        }
    }
}
