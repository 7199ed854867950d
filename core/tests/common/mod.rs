//! Shared test doubles: an in-memory host and instrumented engines.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use codec_core::boundary::{BufferShape, Host, check_shape};
use codec_core::buffers::{ByteView, OutputBuffer};
use codec_core::compression::{SizePrediction, TransformEngine};
use codec_core::types::BoundaryError;

// -----------------------------------------------------------------------------
// Host double
// -----------------------------------------------------------------------------

/// Values a dynamically typed host could pass in or get back.
#[derive(Debug)]
pub enum HostValue {
    Bytes(Vec<u8>),
    Text(String),
    Number(f64),
    Object(Vec<(String, HostValue)>),
    /// Two-dimensional byte array.
    Grid(Vec<Vec<u8>>),
    /// One-dimensional array of 16-bit elements.
    Words(Vec<u16>),
    /// Every other byte of the backing store.
    Strided(Vec<u8>),
    /// Container wrapping an adopted output, zero copy.
    Array(OutputBuffer),
    Sentinel(Arc<()>),
}

impl HostValue {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        HostValue::Bytes(data.into())
    }

    /// Contents of an adopted output.
    pub fn output(&self) -> &OutputBuffer {
        match self {
            HostValue::Array(out) => out,
            other => panic!("expected an output array, got {other:?}"),
        }
    }
}

pub struct MemoryHost {
    sentinel: Arc<()>,
    fail_adopt: bool,
    adopted: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self { sentinel: Arc::new(()), fail_adopt: false, adopted: AtomicUsize::new(0) }
    }

    /// A host whose container creation always fails.
    pub fn failing_adopt() -> Self {
        Self { fail_adopt: true, ..Self::new() }
    }

    /// Identity comparison against this host's sentinel.
    pub fn is_failed(&self, value: &HostValue) -> bool {
        matches!(value, HostValue::Sentinel(s) if Arc::ptr_eq(s, &self.sentinel))
    }

    pub fn adopted(&self) -> usize {
        self.adopted.load(Ordering::SeqCst)
    }
}

impl Host for MemoryHost {
    type Value = HostValue;

    fn inspect<R>(
        &self,
        value: Option<&HostValue>,
        visit: impl FnOnce(ByteView<'_>) -> R,
    ) -> Result<R, BoundaryError> {
        let value = value.ok_or_else(|| BoundaryError::validation("missing argument"))?;
        let bytes: &[u8] = match value {
            HostValue::Bytes(data) => {
                check_shape(&BufferShape::bytes())?;
                data
            }
            HostValue::Array(out) => {
                check_shape(&BufferShape::bytes())?;
                out.as_slice()
            }
            HostValue::Grid(_) => {
                check_shape(&BufferShape { dimensions: 2, ..BufferShape::bytes() })?;
                unreachable!("2-D shape accepted")
            }
            HostValue::Words(_) => {
                check_shape(&BufferShape { format: "H", item_size: 2, ..BufferShape::bytes() })?;
                unreachable!("u16 shape accepted")
            }
            HostValue::Strided(_) => {
                check_shape(&BufferShape { contiguous: false, ..BufferShape::bytes() })?;
                unreachable!("strided shape accepted")
            }
            other => return Err(BoundaryError::validation(format!("not a byte buffer: {other:?}"))),
        };
        Ok(visit(ByteView::new(bytes)))
    }

    fn adopt(&self, output: OutputBuffer) -> Result<HostValue, BoundaryError> {
        if self.fail_adopt {
            drop(output);
            return Err(BoundaryError::handoff("container creation refused"));
        }
        self.adopted.fetch_add(1, Ordering::SeqCst);
        Ok(HostValue::Array(output))
    }

    fn failed(&self) -> HostValue {
        HostValue::Sentinel(Arc::clone(&self.sentinel))
    }
}

// -----------------------------------------------------------------------------
// Engine doubles
// -----------------------------------------------------------------------------

/// Wraps an engine and records every negotiation and fill.
pub struct RecordingEngine<E> {
    inner: E,
    pub predictions: Mutex<Vec<SizePrediction>>,
    pub fill_capacities: Mutex<Vec<usize>>,
}

impl<E: TransformEngine> RecordingEngine<E> {
    pub fn new(inner: E) -> Self {
        Self { inner, predictions: Mutex::new(Vec::new()), fill_capacities: Mutex::new(Vec::new()) }
    }

    fn record_prediction(&self, p: SizePrediction) -> SizePrediction {
        self.predictions.lock().unwrap().push(p);
        p
    }

    fn record_fill(&self, dst: &[u8]) {
        self.fill_capacities.lock().unwrap().push(dst.len());
    }
}

impl<E: TransformEngine> TransformEngine for RecordingEngine<E> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }
    fn compressed_size(&self, src: &[u8]) -> SizePrediction {
        self.record_prediction(self.inner.compressed_size(src))
    }
    fn compress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        self.record_fill(dst);
        self.inner.compress_into(dst, src)
    }
    fn decompressed_size(&self, src: &[u8]) -> SizePrediction {
        self.record_prediction(self.inner.decompressed_size(src))
    }
    fn decompress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        self.record_fill(dst);
        self.inner.decompress_into(dst, src)
    }
}

/// Output equals input, both directions.
pub struct IdentityEngine;

impl TransformEngine for IdentityEngine {
    fn name(&self) -> &'static str {
        "identity"
    }
    fn compressed_size(&self, src: &[u8]) -> SizePrediction {
        SizePrediction::Bytes(src.len())
    }
    fn compress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        dst.copy_from_slice(src);
        true
    }
    fn decompressed_size(&self, src: &[u8]) -> SizePrediction {
        SizePrediction::Bytes(src.len())
    }
    fn decompress_into(&self, dst: &mut [u8], src: &[u8]) -> bool {
        dst.copy_from_slice(src);
        true
    }
}

/// Negotiates normally, writes into the destination, then reports failure.
pub struct DirtyFailEngine;

impl TransformEngine for DirtyFailEngine {
    fn name(&self) -> &'static str {
        "dirty-fail"
    }
    fn compressed_size(&self, src: &[u8]) -> SizePrediction {
        SizePrediction::Bytes(src.len() + 1)
    }
    fn compress_into(&self, dst: &mut [u8], _src: &[u8]) -> bool {
        dst.fill(0xAA);
        false
    }
    fn decompressed_size(&self, src: &[u8]) -> SizePrediction {
        SizePrediction::Bytes(src.len() + 1)
    }
    fn decompress_into(&self, dst: &mut [u8], _src: &[u8]) -> bool {
        dst.fill(0xAA);
        false
    }
}

/// Panics inside the fill step.
pub struct PanickingEngine;

impl TransformEngine for PanickingEngine {
    fn name(&self) -> &'static str {
        "panicking"
    }
    fn compressed_size(&self, src: &[u8]) -> SizePrediction {
        SizePrediction::Bytes(src.len())
    }
    fn compress_into(&self, dst: &mut [u8], _src: &[u8]) -> bool {
        dst.fill(0x55);
        panic!("engine exploded");
    }
    fn decompressed_size(&self, src: &[u8]) -> SizePrediction {
        SizePrediction::Bytes(src.len())
    }
    fn decompress_into(&self, _dst: &mut [u8], _src: &[u8]) -> bool {
        panic!("engine exploded");
    }
}

/// Claims a fixed output size regardless of input.
pub struct FixedSizeEngine(pub usize);

impl TransformEngine for FixedSizeEngine {
    fn name(&self) -> &'static str {
        "fixed-size"
    }
    fn compressed_size(&self, _src: &[u8]) -> SizePrediction {
        SizePrediction::Bytes(self.0)
    }
    fn compress_into(&self, dst: &mut [u8], _src: &[u8]) -> bool {
        dst.fill(1);
        true
    }
    fn decompressed_size(&self, _src: &[u8]) -> SizePrediction {
        SizePrediction::Invalid
    }
    fn decompress_into(&self, _dst: &mut [u8], _src: &[u8]) -> bool {
        unreachable!("decompress is never sized")
    }
}

/// `[0, 1, 2, ..., 255]`
pub fn all_byte_values() -> Vec<u8> {
    (0..=255u8).collect()
}
