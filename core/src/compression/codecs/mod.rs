//! compression/codecs/mod.rs
//! Concrete transform engines.

pub mod deflate;
pub mod zstd;

pub use deflate::*;
pub use zstd::*;
