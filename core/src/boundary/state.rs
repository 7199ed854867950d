//! boundary/state.rs
//! Linear per-call state machine.
//!
//! `Idle → Validating → SizeQuery → Transforming → HandingOff → Done`,
//! with `Failed` reachable from every non-terminal state. Nothing is
//! re-entered and nothing is retried.
use std::fmt;

use tracing::trace;

use crate::compression::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationState {
    Idle,
    Validating,
    SizeQuery,
    Transforming,
    HandingOff,
    Done,
    Failed,
}

impl OperationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, OperationState::Done | OperationState::Failed)
    }

    /// Successor on the success path, `None` for terminal states.
    pub fn next(self) -> Option<Self> {
        match self {
            OperationState::Idle         => Some(OperationState::Validating),
            OperationState::Validating   => Some(OperationState::SizeQuery),
            OperationState::SizeQuery    => Some(OperationState::Transforming),
            OperationState::Transforming => Some(OperationState::HandingOff),
            OperationState::HandingOff   => Some(OperationState::Done),
            OperationState::Done | OperationState::Failed => None,
        }
    }

    pub fn can_advance_to(self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == OperationState::Failed || self.next() == Some(to)
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationState::Idle         => "idle",
            OperationState::Validating   => "validating",
            OperationState::SizeQuery    => "size-query",
            OperationState::Transforming => "transforming",
            OperationState::HandingOff   => "handing-off",
            OperationState::Done         => "done",
            OperationState::Failed       => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal transition {from} -> {to}")]
pub struct IllegalTransition {
    pub from: OperationState,
    pub to: OperationState,
}

/// Tracks one call's traversal of the state machine.
#[derive(Debug)]
pub struct OperationTracker {
    op: OperationKind,
    state: OperationState,
    input_len: usize,
}

impl OperationTracker {
    pub fn new(op: OperationKind) -> Self {
        Self { op, state: OperationState::Idle, input_len: 0 }
    }

    pub fn operation(&self) -> OperationKind {
        self.op
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    /// Length of the validated input; zero until validation succeeds.
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn set_input_len(&mut self, len: usize) {
        self.input_len = len;
    }

    pub fn advance(&mut self, to: OperationState) -> Result<(), IllegalTransition> {
        if !self.state.can_advance_to(to) {
            return Err(IllegalTransition { from: self.state, to });
        }
        trace!(op = %self.op, from = %self.state, to = %to, "state transition");
        self.state = to;
        Ok(())
    }

    /// Move to `Failed`. No-op once terminal.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            trace!(op = %self.op, from = %self.state, "state transition to failed");
            self.state = OperationState::Failed;
        }
    }
}
