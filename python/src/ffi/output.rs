//! ffi/output.rs
//! `rust_codec.OutputBuffer`: an immutable, read-only byte buffer owned by
//! Python. Exposes the boundary's `OutputBuffer` through the buffer protocol
//! without copying; the release callback fires when Python frees it.
use std::os::raw::{c_int, c_void};

use codec_core::buffers::OutputBuffer;
use pyo3::buffer::PyBuffer;
use pyo3::exceptions::PyBufferError;
use pyo3::ffi;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

#[pyclass(frozen, name = "OutputBuffer", module = "rust_codec")]
pub struct PyOutputBuffer {
    inner: OutputBuffer,
}

impl PyOutputBuffer {
    pub fn new(inner: OutputBuffer) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyOutputBuffer {
    /// Read-only export; writable requests raise `BufferError`.
    unsafe fn __getbuffer__(
        slf: Bound<'_, Self>,
        view: *mut ffi::Py_buffer,
        flags: c_int,
    ) -> PyResult<()> {
        if view.is_null() {
            return Err(PyBufferError::new_err("view is null"));
        }
        let bytes = slf.get().inner.as_slice();
        let rc = ffi::PyBuffer_FillInfo(
            view,
            slf.as_ptr(),
            bytes.as_ptr() as *mut c_void,
            bytes.len() as ffi::Py_ssize_t,
            1,
            flags,
        );
        if rc == -1 {
            return Err(PyErr::fetch(slf.py()));
        }
        Ok(())
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __bytes__<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, self.inner.as_slice())
    }

    /// Equal to any byte buffer with the same contents.
    fn __eq__(&self, other: &Bound<'_, PyAny>) -> bool {
        PyBuffer::<u8>::get_bound(other)
            .and_then(|buf| buf.to_vec(other.py()))
            .map(|v| v == self.inner.as_slice())
            .unwrap_or(false)
    }

    fn __repr__(&self) -> String {
        format!("OutputBuffer(len={})", self.inner.len())
    }
}
