//! Modem engine
//!
//! A [`Modem`] is built once for a (scheme, bits/symbol) pair and then maps
//! symbols to complex baseband points and back. The family is chosen at
//! construction and never changes; every call afterwards goes straight to
//! that family's mapper.
//!
//! Differential modems and the quality metrics are mutated by every call.
//! A modem is meant to be driven by one caller, in stream order.

pub mod apsk;
mod arbitrary;
mod differential;
mod linear;
pub mod loader;
pub mod params;
mod phase;

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use num_complex::Complex32;

use crate::domain::{Demodulation, ModemConfig, ModemError, ModemInfo, ModemResult, Scheme};
use apsk::{Apsk, ApskTables};
use arbitrary::{Arbitrary, Reflection};
use differential::Dpsk;
use linear::{Ask, Qam};
use params::QamSplit;
use phase::{Bpsk, Psk, Qpsk};

/// Widest symbol supported by any scheme
pub const MAX_BITS_PER_SYMBOL: u32 = 12;

/// Symbol ↔ sample mapping for one modulation family
pub(crate) trait SymbolMapper {
    /// Map a symbol (already range checked) to its constellation point
    fn modulate(&mut self, symbol: u32) -> Complex32;

    /// Decide the symbol for `sample`, returning it with its ideal point
    fn demodulate(&mut self, sample: Complex32) -> (u32, Complex32);
}

#[derive(Debug, Clone)]
enum Variant {
    Ask(Ask),
    Qam(Qam),
    Psk(Psk),
    Dpsk(Dpsk),
    Bpsk(Bpsk),
    Qpsk(Qpsk),
    Apsk(Apsk),
    Arbitrary(Arbitrary),
}

impl Variant {
    fn mapper(&mut self) -> &mut dyn SymbolMapper {
        match self {
            Self::Ask(v) => v,
            Self::Qam(v) => v,
            Self::Psk(v) => v,
            Self::Dpsk(v) => v,
            Self::Bpsk(v) => v,
            Self::Qpsk(v) => v,
            Self::Apsk(v) => v,
            Self::Arbitrary(v) => v,
        }
    }
}

/// A digital modem for one modulation scheme
#[derive(Debug, Clone)]
pub struct Modem {
    scheme: Scheme,
    bits_per_symbol: u32,
    constellation_size: u32,
    variant: Variant,
    phase_error: f32,
    evm: f32,
}

fn check_width(bits_per_symbol: u32) -> ModemResult<()> {
    if bits_per_symbol < 1 {
        return Err(ModemError::InvalidConfig(
            "modem must have at least 1 bit/symbol".to_string(),
        ));
    }
    if bits_per_symbol > MAX_BITS_PER_SYMBOL {
        return Err(ModemError::InvalidConfig(format!(
            "maximum number of bits/symbol ({MAX_BITS_PER_SYMBOL}) exceeded: {bits_per_symbol}"
        )));
    }
    Ok(())
}

impl Modem {
    /// Create a modem for `scheme` with `bits_per_symbol` bits per symbol.
    ///
    /// BPSK and QPSK ignore the width (once it passes the range check).
    /// `Scheme::Apsk` resolves to the 16/32/64-point table set for widths
    /// 4/5/6.
    pub fn create(scheme: Scheme, bits_per_symbol: u32) -> ModemResult<Self> {
        check_width(bits_per_symbol)?;

        let modem = match scheme {
            Scheme::Psk => Self::psk(bits_per_symbol),
            Scheme::Dpsk => Self::dpsk(bits_per_symbol),
            Scheme::Ask => Self::ask(bits_per_symbol),
            Scheme::Qam => Self::qam(bits_per_symbol),
            Scheme::Apsk => Self::apsk(bits_per_symbol),
            Scheme::Arb => Self::arb(bits_per_symbol),
            Scheme::ArbMirrored => Self::arb_mirrored(bits_per_symbol),
            Scheme::ArbRotated => Self::arb_rotated(bits_per_symbol),
            Scheme::Bpsk => Ok(Self::bpsk()),
            Scheme::Qpsk => Ok(Self::qpsk()),
            Scheme::Apsk16 => Self::apsk_fixed(Scheme::Apsk16, 4, bits_per_symbol),
            Scheme::Apsk32 => Self::apsk_fixed(Scheme::Apsk32, 5, bits_per_symbol),
            Scheme::Apsk64 => Self::apsk_fixed(Scheme::Apsk64, 6, bits_per_symbol),
        }?;

        log::debug!(
            "created {} modem: m={}, M={}, alpha={:?}",
            modem.scheme,
            modem.bits_per_symbol,
            modem.constellation_size,
            modem.alpha()
        );
        Ok(modem)
    }

    /// Create a modem from a scheme name such as `"qam"` or `"arb-rotated"`
    pub fn create_by_name(name: &str, bits_per_symbol: u32) -> ModemResult<Self> {
        Self::create(name.parse()?, bits_per_symbol)
    }

    /// Build a modem from a saved profile, loading its constellation file if
    /// one is named
    pub fn from_config(config: &ModemConfig) -> ModemResult<Self> {
        let mut modem = Self::create(config.scheme, config.bits_per_symbol)?;
        if let Some(path) = &config.constellation_file {
            modem.load_constellation_from_file(path)?;
        }
        Ok(modem)
    }

    fn build(
        scheme: Scheme,
        bits_per_symbol: u32,
        constellation_size: u32,
        variant: Variant,
    ) -> Self {
        Self {
            scheme,
            bits_per_symbol,
            constellation_size,
            variant,
            phase_error: 0.0,
            evm: 0.0,
        }
    }

    /// Amplitude-shift keying with `2^m` Gray-coded levels
    pub fn ask(bits_per_symbol: u32) -> ModemResult<Self> {
        check_width(bits_per_symbol)?;
        let ask = Ask::new(bits_per_symbol);
        Ok(Self::build(Scheme::Ask, bits_per_symbol, ask.size, Variant::Ask(ask)))
    }

    /// Square or rectangular QAM, `m` bits split across the I and Q axes
    pub fn qam(bits_per_symbol: u32) -> ModemResult<Self> {
        check_width(bits_per_symbol)?;
        Ok(Self::build(
            Scheme::Qam,
            bits_per_symbol,
            1 << bits_per_symbol,
            Variant::Qam(Qam::new(bits_per_symbol)),
        ))
    }

    /// Phase-shift keying with `2^m` Gray-coded phases
    pub fn psk(bits_per_symbol: u32) -> ModemResult<Self> {
        check_width(bits_per_symbol)?;
        Ok(Self::build(
            Scheme::Psk,
            bits_per_symbol,
            1 << bits_per_symbol,
            Variant::Psk(Psk::new(bits_per_symbol)),
        ))
    }

    /// Differential PSK; each symbol advances the phase of the previous one
    pub fn dpsk(bits_per_symbol: u32) -> ModemResult<Self> {
        check_width(bits_per_symbol)?;
        Ok(Self::build(
            Scheme::Dpsk,
            bits_per_symbol,
            1 << bits_per_symbol,
            Variant::Dpsk(Dpsk::new(bits_per_symbol)),
        ))
    }

    /// Binary PSK on the real axis
    pub fn bpsk() -> Self {
        Self::build(Scheme::Bpsk, 1, 2, Variant::Bpsk(Bpsk))
    }

    /// Quadrature PSK with one bit per axis
    pub fn qpsk() -> Self {
        Self::build(Scheme::Qpsk, 2, 4, Variant::Qpsk(Qpsk))
    }

    /// APSK with the table set matching `bits_per_symbol` (4, 5 or 6)
    pub fn apsk(bits_per_symbol: u32) -> ModemResult<Self> {
        match bits_per_symbol {
            4 => Self::apsk_fixed(Scheme::Apsk16, 4, bits_per_symbol),
            5 => Self::apsk_fixed(Scheme::Apsk32, 5, bits_per_symbol),
            6 => Self::apsk_fixed(Scheme::Apsk64, 6, bits_per_symbol),
            other => Err(ModemError::InvalidConfig(format!(
                "unsupported APSK width {other} (expected 4, 5 or 6 bits/symbol)"
            ))),
        }
    }

    fn apsk_fixed(scheme: Scheme, width: u32, bits_per_symbol: u32) -> ModemResult<Self> {
        if bits_per_symbol != width {
            return Err(ModemError::InvalidConfig(format!(
                "{scheme} requires exactly {width} bits/symbol, got {bits_per_symbol}"
            )));
        }
        let tables = apsk::tables_for(width).ok_or_else(|| {
            ModemError::InvalidConfig(format!("no APSK tables for {width} bits/symbol"))
        })?;
        Ok(Self::build(
            scheme,
            width,
            tables.size(),
            Variant::Apsk(Apsk::new(tables)),
        ))
    }

    /// Arbitrary constellation of `2^m` points, empty until loaded
    pub fn arb(bits_per_symbol: u32) -> ModemResult<Self> {
        Self::arbitrary(Scheme::Arb, bits_per_symbol)
    }

    /// First-quadrant constellation of `2^m / 4` points, mirrored into the
    /// other quadrants
    pub fn arb_mirrored(bits_per_symbol: u32) -> ModemResult<Self> {
        Self::arbitrary(Scheme::ArbMirrored, bits_per_symbol)
    }

    /// First-quadrant constellation of `2^m / 4` points, rotated into the
    /// other quadrants
    pub fn arb_rotated(bits_per_symbol: u32) -> ModemResult<Self> {
        Self::arbitrary(Scheme::ArbRotated, bits_per_symbol)
    }

    fn arbitrary(scheme: Scheme, bits_per_symbol: u32) -> ModemResult<Self> {
        check_width(bits_per_symbol)?;
        let reflection = match scheme {
            Scheme::Arb => Reflection::None,
            Scheme::ArbMirrored => Reflection::Mirrored,
            Scheme::ArbRotated => Reflection::Rotated,
            other => return Err(ModemError::UnsupportedScheme(other.to_string())),
        };
        let mut size = 1 << bits_per_symbol;
        if scheme.is_quadrant_reflected() {
            if bits_per_symbol < 2 {
                return Err(ModemError::InvalidConfig(format!(
                    "{scheme} needs at least 2 bits/symbol, got {bits_per_symbol}"
                )));
            }
            // one quadrant of the full 2^m constellation
            size >>= 2;
        }
        Ok(Self::build(
            scheme,
            bits_per_symbol,
            size,
            Variant::Arbitrary(Arbitrary::new(reflection, size)),
        ))
    }

    fn arbitrary_mut(&mut self, operation: &'static str) -> ModemResult<&mut Arbitrary> {
        match &mut self.variant {
            Variant::Arbitrary(arb) => Ok(arb),
            _ => Err(ModemError::SchemeMismatch {
                operation,
                scheme: self.scheme,
            }),
        }
    }

    /// Load the points of an arbitrary constellation.
    ///
    /// Exactly `constellation_size()` points are required. Plain ARB maps
    /// are centred on the origin; every arbitrary map is scaled to unit
    /// average energy. On error the modem keeps its previous map.
    pub fn load_constellation(&mut self, points: &[Complex32]) -> ModemResult<()> {
        self.arbitrary_mut("load_constellation")?.load(points)
    }

    /// Load an arbitrary constellation from a text source (see [`loader`])
    pub fn load_constellation_from_reader<R: BufRead>(&mut self, reader: R) -> ModemResult<()> {
        let count = self
            .arbitrary_mut("load_constellation_from_reader")?
            .symbol_map
            .len();
        let points = loader::read_points(reader, count)?;
        self.load_constellation(&points)
    }

    /// Load an arbitrary constellation from a text file
    pub fn load_constellation_from_file(&mut self, path: impl AsRef<Path>) -> ModemResult<()> {
        let count = self
            .arbitrary_mut("load_constellation_from_file")?
            .symbol_map
            .len();
        let points = loader::read_points_from_file(path, count)?;
        self.load_constellation(&points)
    }

    fn ensure_ready(&self) -> ModemResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ModemError::NotLoaded(self.scheme))
        }
    }

    /// Map a symbol to its constellation point
    pub fn modulate(&mut self, symbol: u32) -> ModemResult<Complex32> {
        self.ensure_ready()?;
        let limit = self.symbol_count();
        if symbol >= limit {
            return Err(ModemError::SymbolOutOfRange { symbol, limit });
        }
        Ok(self.variant.mapper().modulate(symbol))
    }

    /// Recover the nearest symbol from a received sample and record the
    /// phase error and EVM against the decided point
    pub fn demodulate(&mut self, sample: Complex32) -> ModemResult<Demodulation> {
        self.ensure_ready()?;
        let (symbol, ideal) = self.variant.mapper().demodulate(sample);
        self.phase_error = (sample * ideal.conj()).arg();
        self.evm = (sample - ideal).norm();
        Ok(Demodulation {
            symbol,
            phase_error: self.phase_error,
            evm: self.evm,
        })
    }

    /// Modulate a run of symbols in order
    pub fn modulate_block(&mut self, symbols: &[u32]) -> ModemResult<Vec<Complex32>> {
        symbols.iter().map(|&s| self.modulate(s)).collect()
    }

    /// Demodulate a run of samples in order, returning only the symbols
    pub fn demodulate_block(&mut self, samples: &[Complex32]) -> ModemResult<Vec<u32>> {
        samples
            .iter()
            .map(|&x| self.demodulate(x).map(|d| d.symbol))
            .collect()
    }

    /// Return differential state to the unit reference and clear the metrics
    pub fn reset(&mut self) {
        if let Variant::Dpsk(dpsk) = &mut self.variant {
            dpsk.reset();
        }
        self.phase_error = 0.0;
        self.evm = 0.0;
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn bits_per_symbol(&self) -> u32 {
        self.bits_per_symbol
    }

    /// `M`: points in the constellation table (one quadrant for the
    /// mirrored/rotated arbitrary schemes)
    pub fn constellation_size(&self) -> u32 {
        self.constellation_size
    }

    /// Number of distinct symbols `modulate` accepts
    pub fn symbol_count(&self) -> u32 {
        if self.scheme.is_quadrant_reflected() {
            4 * self.constellation_size
        } else {
            self.constellation_size
        }
    }

    /// Amplitude (ASK/QAM) or phase (PSK/DPSK) step
    pub fn alpha(&self) -> Option<f32> {
        match &self.variant {
            Variant::Ask(v) => Some(v.alpha),
            Variant::Qam(v) => Some(v.alpha),
            Variant::Psk(v) => Some(v.params.alpha),
            Variant::Dpsk(v) => Some(v.params.alpha),
            _ => None,
        }
    }

    /// Maximum phase deviation used by the PSK/DPSK slicer
    pub fn d_phi(&self) -> Option<f32> {
        match &self.variant {
            Variant::Psk(v) => Some(v.params.d_phi),
            Variant::Dpsk(v) => Some(v.params.d_phi),
            _ => None,
        }
    }

    /// Per-bit reference table; empty for table-free schemes
    pub fn reference(&self) -> &[f32] {
        match &self.variant {
            Variant::Ask(v) => &v.reference,
            Variant::Qam(v) => &v.reference,
            Variant::Psk(v) => &v.params.reference,
            Variant::Dpsk(v) => &v.params.reference,
            _ => &[],
        }
    }

    pub fn qam_split(&self) -> Option<QamSplit> {
        match &self.variant {
            Variant::Qam(v) => Some(v.split),
            _ => None,
        }
    }

    pub fn apsk_tables(&self) -> Option<&'static ApskTables> {
        match &self.variant {
            Variant::Apsk(v) => Some(v.tables),
            _ => None,
        }
    }

    /// Loaded arbitrary constellation, if any
    pub fn symbol_map(&self) -> Option<&[Complex32]> {
        match &self.variant {
            Variant::Arbitrary(arb) if arb.loaded => Some(arb.symbol_map.as_slice()),
            _ => None,
        }
    }

    /// Previous sample and phase of a differential modem
    pub fn differential_state(&self) -> Option<(Complex32, f32)> {
        match &self.variant {
            Variant::Dpsk(v) => Some((v.state, v.state_theta)),
            _ => None,
        }
    }

    /// False only for an arbitrary modem that has not been loaded
    pub fn is_ready(&self) -> bool {
        if !self.scheme.is_arbitrary() {
            return true;
        }
        matches!(&self.variant, Variant::Arbitrary(arb) if arb.loaded)
    }

    /// Phase error of the last demodulated sample
    pub fn phase_error(&self) -> f32 {
        self.phase_error
    }

    /// Error vector magnitude of the last demodulated sample
    pub fn evm(&self) -> f32 {
        self.evm
    }

    pub fn describe(&self) -> ModemInfo {
        ModemInfo {
            scheme: self.scheme,
            bits_per_symbol: self.bits_per_symbol,
        }
    }
}

impl fmt::Display for Modem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "linear modem:")?;
        writeln!(f, "    scheme:         {}", self.scheme)?;
        write!(f, "    bits/symbol:    {}", self.bits_per_symbol)
    }
}
