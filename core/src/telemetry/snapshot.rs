//! telemetry/snapshot.rs
//! Immutable view of `BoundaryTelemetry` at one point in time.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub compress_calls: u64,
    pub decompress_calls: u64,
    pub validation_failures: u64,
    pub size_failures: u64,
    pub allocation_failures: u64,
    pub transform_failures: u64,
    pub handoff_failures: u64,
    pub scratch_allocated: u64,
    pub scratch_wiped: u64,
    pub scratch_bytes_wiped: u64,
    pub outputs_registered: u64,
    pub outputs_released: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl TelemetrySnapshot {
    pub fn calls(&self) -> u64 {
        self.compress_calls + self.decompress_calls
    }

    pub fn failures(&self) -> u64 {
        self.validation_failures
            + self.size_failures
            + self.allocation_failures
            + self.transform_failures
            + self.handoff_failures
    }

    /// Outputs whose container the host has not reclaimed yet.
    pub fn outstanding_outputs(&self) -> u64 {
        self.outputs_registered.saturating_sub(self.outputs_released)
    }

    /// Internal invariants once no call is in flight:
    /// - every scratch buffer allocated was wiped
    /// - no output was released more often than registered
    /// - failures and registered outputs each stay within the call count
    pub fn sanity_check(&self) -> bool {
        self.scratch_allocated == self.scratch_wiped
            && self.outputs_released <= self.outputs_registered
            && self.failures() <= self.calls()
            && self.outputs_registered <= self.calls()
    }
}
