//! boundary/mod.rs
//! One synchronous compress/decompress call across a host boundary.
//!
//! host value → validate → negotiate size → transform into scratch →
//! hand off a copy → host-owned result, or the host's failure sentinel.
//!
//! - Every failure, including a panic inside the engine, collapses to
//!   `Host::failed()`. The typed cause is logged, never returned.
//! - No state is kept between calls apart from telemetry counters.

pub mod config;
pub mod handoff;
pub mod host;
pub mod invoke;
pub mod negotiate;
pub mod state;
pub mod validator;

pub use config::*;
pub use handoff::*;
pub use host::*;
pub use invoke::*;
pub use negotiate::*;
pub use state::*;
pub use validator::*;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::debug;

use crate::buffers::{ByteView, ScratchBuffer};
use crate::compression::{OperationKind, TransformEngine, create_engine};
use crate::telemetry::{BoundaryTelemetry, TelemetrySnapshot};
use crate::types::BoundaryError;

pub struct Boundary<E = Box<dyn TransformEngine>> {
    engine: E,
    config: BoundaryConfig,
    telemetry: Arc<BoundaryTelemetry>,
}

impl Boundary {
    /// Boundary over the engine registered for `config.codec`.
    pub fn from_config(config: BoundaryConfig) -> Self {
        Self::new(create_engine(config.codec), config)
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::from_config(BoundaryConfig::default())
    }
}

impl<E: TransformEngine> Boundary<E> {
    pub fn new(engine: E, config: BoundaryConfig) -> Self {
        Self { engine, config, telemetry: Arc::new(BoundaryTelemetry::new()) }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.telemetry.snapshot()
    }

    pub fn compress<H: Host>(&self, host: &H, input: Option<&H::Value>) -> H::Value {
        self.run(host, OperationKind::Compress, input)
    }

    pub fn decompress<H: Host>(&self, host: &H, input: Option<&H::Value>) -> H::Value {
        self.run(host, OperationKind::Decompress, input)
    }

    /// Run `op` on `input`, returning the wrapped result or `host.failed()`.
    pub fn run<H: Host>(&self, host: &H, op: OperationKind, input: Option<&H::Value>) -> H::Value {
        self.telemetry.record_call(op);
        let mut tracker = OperationTracker::new(op);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute(host, &mut tracker, input)));
        let result = outcome.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            Err(BoundaryError::from_panic(tracker.state(), op, self.engine.name(), tracker.input_len(), message))
        });

        match result {
            Ok(value) => value,
            Err(err) => {
                debug!(%op, state = %tracker.state(), kind = ?err.kind(), error = %err, "operation failed");
                tracker.fail();
                self.telemetry.record_failure(err.kind());
                host.failed()
            }
        }
    }

    fn execute<H: Host>(
        &self,
        host: &H,
        tracker: &mut OperationTracker,
        input: Option<&H::Value>,
    ) -> Result<H::Value, BoundaryError> {
        step(tracker, OperationState::Validating)?;
        let scratch = host.inspect(input, |view| {
            self.telemetry.record_input(view.len());
            tracker.set_input_len(view.len());
            self.transform(tracker, view)
        })??;

        step(tracker, OperationState::HandingOff)?;
        let value = hand_off(host, scratch, &self.telemetry)?;

        step(tracker, OperationState::Done)?;
        Ok(value)
    }

    fn transform(&self, tracker: &mut OperationTracker, view: ByteView<'_>) -> Result<ScratchBuffer, BoundaryError> {
        let op = tracker.operation();

        step(tracker, OperationState::SizeQuery)?;
        let size = negotiate_size(&self.engine, op, view, self.config.max_output_size)?;

        step(tracker, OperationState::Transforming)?;
        invoke_transform(&self.engine, op, view, size, &self.telemetry)
    }
}

fn step(tracker: &mut OperationTracker, to: OperationState) -> Result<(), BoundaryError> {
    // Only reachable through a bug in the call sequence above.
    tracker.advance(to).map_err(|e| BoundaryError::handoff(e.to_string()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
