//! ffi/host.rs
//! Python as a boundary host: buffer-protocol input, `OutputBuffer` results,
//! `None` as the failure sentinel.
use codec_core::boundary::{BufferShape, Host, check_shape};
use codec_core::buffers::{ByteView, OutputBuffer};
use codec_core::types::BoundaryError;
use pyo3::buffer::PyBuffer;
use pyo3::prelude::*;

use super::output::PyOutputBuffer;

pub struct PyHost<'py> {
    py: Python<'py>,
}

impl<'py> PyHost<'py> {
    pub fn new(py: Python<'py>) -> Self {
        Self { py }
    }
}

impl<'py> Host for PyHost<'py> {
    type Value = Bound<'py, PyAny>;

    fn inspect<R>(
        &self,
        value: Option<&Bound<'py, PyAny>>,
        visit: impl FnOnce(ByteView<'_>) -> R,
    ) -> Result<R, BoundaryError> {
        let value = value.ok_or_else(|| BoundaryError::validation("missing data argument"))?;
        let buffer = PyBuffer::<u8>::get_bound(value)
            .map_err(|e| BoundaryError::validation(format!("not a byte buffer: {e}")))?;

        let format = buffer.format().to_str().unwrap_or("");
        check_shape(&BufferShape {
            format,
            item_size: buffer.item_size(),
            dimensions: buffer.dimensions(),
            contiguous: buffer.is_c_contiguous(),
        })?;

        let len = buffer.len_bytes();
        let bytes: &[u8] = if len == 0 {
            &[]
        } else {
            // SAFETY: the export is C-contiguous u8 of `len` bytes and stays
            // pinned while `buffer` lives. The GIL is held for the whole call,
            // so no Python code can mutate it before `visit` returns.
            unsafe { std::slice::from_raw_parts(buffer.buf_ptr() as *const u8, len) }
        };
        Ok(visit(ByteView::new(bytes)))
    }

    fn adopt(&self, output: OutputBuffer) -> Result<Bound<'py, PyAny>, BoundaryError> {
        Bound::new(self.py, PyOutputBuffer::new(output))
            .map(Bound::into_any)
            .map_err(|e| BoundaryError::handoff(format!("cannot create OutputBuffer: {e}")))
    }

    fn failed(&self) -> Bound<'py, PyAny> {
        self.py.None().into_bound(self.py)
    }
}
