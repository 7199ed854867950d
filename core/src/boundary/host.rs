//! boundary/host.rs
//! The seam a managed host implements.
use crate::buffers::{ByteView, OutputBuffer};
use crate::types::BoundaryError;

/// A managed host environment as seen from the boundary.
///
/// Implementations own the host-specific parts of a call: recognising a byte
/// sequence among arbitrary host values, wrapping an `OutputBuffer` in a
/// host-visible container, and producing the failure sentinel.
pub trait Host {
    /// A host value as passed in and returned.
    type Value;

    /// Borrow `value` as a read-only byte view and run `visit` on it.
    ///
    /// The view is valid only inside `visit`. `None` means the argument was
    /// absent.
    ///
    /// # Errors
    /// - `BoundaryError::Validation` when the value is absent or not a single
    ///   contiguous sequence of unsigned bytes. `visit` is not called.
    fn inspect<R>(
        &self,
        value: Option<&Self::Value>,
        visit: impl FnOnce(ByteView<'_>) -> R,
    ) -> Result<R, BoundaryError>;

    /// Take ownership of `output` and wrap it without copying.
    ///
    /// The container must keep `output` alive until the host reclaims it and
    /// then drop it exactly once. On error `output` must simply be dropped,
    /// never exposed.
    ///
    /// # Errors
    /// - `BoundaryError::Handoff` when the container cannot be created.
    fn adopt(&self, output: OutputBuffer) -> Result<Self::Value, BoundaryError>;

    /// The single, identity-comparable failure sentinel.
    fn failed(&self) -> Self::Value;
}
