//! telemetry/mod.rs
//! Counters collected by a stream adapter.
//!
//! Notes:
//! - Plain counters owned by the adapter; no locks, no atomics.
//! - Running CRC-32 of the logical data lets callers compare what was
//!   written with what was read back.

pub mod counters;

pub use counters::*;
