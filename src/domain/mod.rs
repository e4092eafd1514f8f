//! Core domain types
//!
//! Pure types with no I/O dependencies: the scheme tag, the error taxonomy,
//! demodulator output and saved modem profiles.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
