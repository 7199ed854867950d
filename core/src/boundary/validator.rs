//! boundary/validator.rs
//! Shape rules a host buffer must satisfy to become a `ByteView`.
//!
//! Hosts describe what they were given as a `BufferShape`; the rules live
//! here so every host rejects the same shapes.
use crate::types::BoundaryError;

/// Layout of a host-exported buffer, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferShape<'a> {
    /// Element format code (struct-module style, e.g. `"B"`).
    pub format: &'a str,
    pub item_size: usize,
    pub dimensions: usize,
    pub contiguous: bool,
}

impl<'a> BufferShape<'a> {
    /// Shape of a plain one-dimensional unsigned byte sequence.
    pub fn bytes() -> Self {
        Self { format: "B", item_size: 1, dimensions: 1, contiguous: true }
    }
}

/// `true` for the unsigned 8-bit format code with an optional byte-order prefix.
pub fn is_unsigned_byte_format(format: &str) -> bool {
    let code = match format.as_bytes() {
        [b'@' | b'=' | b'<' | b'>' | b'!', rest @ ..] => rest,
        other => other,
    };
    code == b"B"
}

/// Accept only a single contiguous, one-dimensional sequence of `u8`.
///
/// # Errors
/// - `BoundaryError::Validation` naming the first rule the shape breaks.
pub fn check_shape(shape: &BufferShape<'_>) -> Result<(), BoundaryError> {
    if !is_unsigned_byte_format(shape.format) || shape.item_size != 1 {
        return Err(BoundaryError::validation(format!(
            "element type {:?} (item size {}) is not an unsigned byte",
            shape.format, shape.item_size
        )));
    }
    if shape.dimensions != 1 {
        return Err(BoundaryError::validation(format!(
            "expected 1 dimension, got {}",
            shape.dimensions
        )));
    }
    if !shape.contiguous {
        return Err(BoundaryError::validation("buffer is not contiguous"));
    }
    Ok(())
}
