//! buffers/mod.rs
//! The three byte regions a call touches.
//!
//! - `ByteView`: borrowed from the host for one call, read-only.
//! - `ScratchBuffer`: exact-sized transform target, erased on drop.
//! - `OutputBuffer`: independent allocation whose ownership leaves with the host.

pub mod view;
pub mod scratch;
pub mod output;

pub use view::*;
pub use scratch::*;
pub use output::*;
