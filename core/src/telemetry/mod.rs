//! telemetry/mod.rs
//! Boundary counters and immutable snapshots.
//!
//! - Counters are shared by one `Boundary` and by the buffers it creates.
//! - Releases happen at host-controlled time, possibly on another thread,
//!   so the live counters are atomics.
//! - Snapshots are plain values for assertions and logs.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
