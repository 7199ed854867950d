//! compression/mod.rs
//! Transform engines behind the two-phase negotiate-then-fill contract.
//!
//! - Every engine predicts its exact output size before any allocation.
//! - Fill steps write into a destination of exactly that size and report a bool.
//! - Registry resolves codec IDs to engines.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
