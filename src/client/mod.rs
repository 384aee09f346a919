//! Receiver-side presentation helpers
//!
//! Everything here runs on the consumer of snapshots: buffering received
//! state, estimating the clock offset, and blending between samples for a
//! smooth time-shifted view. Nothing in this module feeds back into the
//! simulation.

pub mod buffer;
pub mod interpolate;

pub use buffer::{
    INTERPOLATION_DELAY_MS, MAX_BUFFER_SIZE, MAX_HISTORY_MS, SnapshotBuffer,
};
pub use interpolate::{interpolate_foods, interpolate_point, interpolate_snakes};
