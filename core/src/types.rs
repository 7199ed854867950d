use std::fmt;

use thiserror::Error;

use crate::boundary::OperationState;
use crate::compression::OperationKind;

/// Which buffer an allocation was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRole {
    Scratch,
    Output,
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BufferRole::Scratch => "scratch",
            BufferRole::Output  => "output",
        })
    }
}

/// Coarse failure category, one per `BoundaryError` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Validation,
    SizeComputation,
    Allocation,
    Transform,
    Handoff,
}

/// Internal failure taxonomy of a boundary call.
///
/// Every variant collapses to the host's single failure sentinel. The context
/// carried here is for logs only and never crosses the boundary.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Input is absent or not a single contiguous byte sequence.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// Engine could not size the input, or the size is unrepresentable.
    #[error("{op} size negotiation failed ({engine}, {input_len} input bytes): {reason}")]
    SizeComputation {
        op: OperationKind,
        engine: &'static str,
        input_len: usize,
        reason: String,
    },

    /// Scratch or output allocation failed.
    #[error("allocation of {size} byte {buffer} buffer failed")]
    Allocation { buffer: BufferRole, size: usize },

    /// Engine fill step reported failure after a successful negotiation.
    #[error("{op} transform failed ({engine}): {reason}")]
    Transform {
        op: OperationKind,
        engine: &'static str,
        reason: String,
    },

    /// Wrapping the output for the host failed.
    #[error("handoff failed: {reason}")]
    Handoff { reason: String },
}

impl BoundaryError {
    pub fn validation(reason: impl Into<String>) -> Self {
        BoundaryError::Validation { reason: reason.into() }
    }

    pub fn handoff(reason: impl Into<String>) -> Self {
        BoundaryError::Handoff { reason: reason.into() }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            BoundaryError::Validation { .. }      => FailureKind::Validation,
            BoundaryError::SizeComputation { .. } => FailureKind::SizeComputation,
            BoundaryError::Allocation { .. }      => FailureKind::Allocation,
            BoundaryError::Transform { .. }       => FailureKind::Transform,
            BoundaryError::Handoff { .. }         => FailureKind::Handoff,
        }
    }

    /// Map a panic caught at the boundary onto the stage it escaped from.
    pub fn from_panic(
        state: OperationState,
        op: OperationKind,
        engine: &'static str,
        input_len: usize,
        message: String,
    ) -> Self {
        let reason = format!("panic: {message}");
        match state {
            OperationState::Idle | OperationState::Validating =>
                BoundaryError::Validation { reason },
            OperationState::SizeQuery =>
                BoundaryError::SizeComputation { op, engine, input_len, reason },
            OperationState::Transforming =>
                BoundaryError::Transform { op, engine, reason },
            OperationState::HandingOff | OperationState::Done | OperationState::Failed =>
                BoundaryError::Handoff { reason },
        }
    }
}
