//! Digital modem engine
//!
//! Converts symbols (integers in `[0, M)`) to complex baseband constellation
//! points and recovers symbols, phase error and EVM from received samples.
//!
//! ## Layout
//!
//! - `domain/` - Pure types: scheme tags, errors, modem profiles
//! - `dsp/` - Numeric helpers (Gray code, reference-table slicing, phase wrap)
//! - `modem/` - The modem engine and its per-family mappers
//!
//! ```
//! use digimodem::{Modem, Scheme};
//!
//! let mut modem = Modem::create(Scheme::Qam, 4).unwrap();
//! let point = modem.modulate(9).unwrap();
//! assert_eq!(modem.demodulate(point).unwrap().symbol, 9);
//! ```

pub mod domain;
pub mod dsp;
pub mod modem;

pub use domain::{Demodulation, ModemConfig, ModemError, ModemInfo, ModemResult, Scheme};
pub use modem::{Modem, MAX_BITS_PER_SYMBOL};
pub use num_complex::Complex32;
