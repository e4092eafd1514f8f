//! Digital Signal Processing
//!
//! Pure functions shared by the modem families. No I/O dependencies.

pub mod gray;
pub mod phase;
pub mod slicer;

pub use gray::{gray_decode, gray_encode};
pub use phase::wrap_phase;
pub use slicer::{reference_table, slice_linear};
