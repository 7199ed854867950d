//! ffi/mod.rs
//! Module surface: `compress`, `decompress`, `OPERATION_FAILED`, `OutputBuffer`.
//!
//! Both functions take the first positional argument and ignore the rest, so
//! the call itself never raises. Every failure returns `OPERATION_FAILED`
//! (`None`), compared by identity.

mod host;
mod logging;
mod output;

use std::sync::OnceLock;

use codec_core::boundary::{Boundary, BoundaryConfig};
use codec_core::compression::OperationKind;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyTuple};

use host::PyHost;
use output::PyOutputBuffer;

static CONFIG: OnceLock<BoundaryConfig> = OnceLock::new();

fn config() -> BoundaryConfig {
    *CONFIG.get_or_init(BoundaryConfig::from_env)
}

pub fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    logging::init_logging();
    let config = config();
    tracing::debug!(codec = config.codec.name(), max_output_size = config.max_output_size, "rust_codec loaded");

    m.add_function(wrap_pyfunction!(compress, m)?)?;
    m.add_function(wrap_pyfunction!(decompress, m)?)?;
    m.add_class::<PyOutputBuffer>()?;
    m.add("OPERATION_FAILED", py.None())?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

fn run<'py>(py: Python<'py>, op: OperationKind, args: &Bound<'py, PyTuple>) -> Bound<'py, PyAny> {
    let host = PyHost::new(py);
    let input = args.get_item(0).ok();
    Boundary::from_config(config()).run(&host, op, input.as_ref())
}

/// compress(data) -> OutputBuffer | OPERATION_FAILED
#[pyfunction]
#[pyo3(signature = (*args, **_kwargs))]
fn compress<'py>(
    py: Python<'py>,
    args: &Bound<'py, PyTuple>,
    _kwargs: Option<&Bound<'py, PyDict>>,
) -> Bound<'py, PyAny> {
    run(py, OperationKind::Compress, args)
}

/// decompress(data) -> OutputBuffer | OPERATION_FAILED
#[pyfunction]
#[pyo3(signature = (*args, **_kwargs))]
fn decompress<'py>(
    py: Python<'py>,
    args: &Bound<'py, PyTuple>,
    _kwargs: Option<&Bound<'py, PyDict>>,
) -> Bound<'py, PyAny> {
    run(py, OperationKind::Decompress, args)
}
