//! buffers/output.rs
//! Host-bound result buffer with a one-shot release callback.
use std::collections::TryReserveError;
use std::fmt;
use std::ops::Deref;

use thiserror::Error;

/// Invoked once with the buffer length when the owning container is reclaimed.
pub type ReleaseCallback = Box<dyn FnOnce(usize) + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("release callback already registered")]
pub struct ReleaseAlreadyRegistered;

/// Fresh heap allocation, never shared with the input view or the scratch buffer.
///
/// Single owner: moving it into a host container moves the release with it.
/// The registered callback fires from `Drop`, so it runs exactly once, after
/// which the bytes are freed.
pub struct OutputBuffer {
    bytes: Box<[u8]>,
    release: Option<ReleaseCallback>,
}

impl OutputBuffer {
    /// Copy `src` into a new, exactly-sized allocation.
    ///
    /// # Errors
    /// - Returns the allocator error instead of aborting.
    pub fn copy_from(src: &[u8]) -> Result<Self, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(src.len())?;
        bytes.extend_from_slice(src);
        Ok(Self { bytes: bytes.into_boxed_slice(), release: None })
    }

    /// Register the release callback. Only one may ever be registered.
    pub fn register_release(&mut self, callback: ReleaseCallback) -> Result<(), ReleaseAlreadyRegistered> {
        if self.release.is_some() {
            return Err(ReleaseAlreadyRegistered);
        }
        self.release = Some(callback);
        Ok(())
    }

    pub fn has_release(&self) -> bool {
        self.release.is_some()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Deref for OutputBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for OutputBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for OutputBuffer {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.bytes.len());
        }
    }
}

impl fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("len", &self.bytes.len())
            .field("has_release", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn copy_is_independent_allocation() {
        let src = vec![1u8, 2, 3, 4];
        let out = OutputBuffer::copy_from(&src).unwrap();
        assert_eq!(out.as_slice(), &src[..]);
        assert_ne!(out.as_ptr(), src.as_ptr());
    }

    #[test]
    fn release_fires_exactly_once_on_drop() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);

        let mut out = OutputBuffer::copy_from(&[9u8; 12]).unwrap();
        out.register_release(Box::new(move |len| {
            assert_eq!(len, 12);
            seen.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        // Moving transfers the callback with the buffer.
        let moved = out;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        drop(moved);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn second_registration_is_rejected() {
        let mut out = OutputBuffer::copy_from(&[]).unwrap();
        out.register_release(Box::new(|_| {})).unwrap();
        assert_eq!(out.register_release(Box::new(|_| {})), Err(ReleaseAlreadyRegistered));
        assert!(out.has_release());
    }

    #[test]
    fn drop_without_release_is_silent() {
        let out = OutputBuffer::copy_from(b"abc").unwrap();
        assert!(!out.has_release());
        assert_eq!(&*out, b"abc");
    }
}
