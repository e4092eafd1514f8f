//! Core domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ModemError;

/// Modulation family tag
///
/// Numeric tags accepted by `TryFrom<u32>` follow declaration order
/// starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// M-ary phase shift keying
    Psk,
    /// Differential M-ary phase shift keying
    Dpsk,
    /// Pulse amplitude (amplitude shift keying)
    Ask,
    /// Rectangular/square quadrature amplitude modulation
    Qam,
    /// Amplitude/phase shift keying, width selects 16/32/64 points
    Apsk,
    /// Arbitrary user-defined constellation
    Arb,
    /// Arbitrary first-quadrant constellation, mirrored into all quadrants
    ArbMirrored,
    /// Arbitrary first-quadrant constellation, rotated into all quadrants
    ArbRotated,
    /// Binary phase shift keying (fixed 1 bit/symbol)
    Bpsk,
    /// Quaternary phase shift keying (fixed 2 bits/symbol)
    Qpsk,
    /// 16-APSK (4,12)
    Apsk16,
    /// 32-APSK (4,12,16)
    Apsk32,
    /// 64-APSK (4,14,20,26)
    Apsk64,
}

impl Scheme {
    /// Every scheme, in tag order
    pub const ALL: [Scheme; 13] = [
        Scheme::Psk,
        Scheme::Dpsk,
        Scheme::Ask,
        Scheme::Qam,
        Scheme::Apsk,
        Scheme::Arb,
        Scheme::ArbMirrored,
        Scheme::ArbRotated,
        Scheme::Bpsk,
        Scheme::Qpsk,
        Scheme::Apsk16,
        Scheme::Apsk32,
        Scheme::Apsk64,
    ];

    /// Canonical lowercase name, as used in profiles
    pub fn name(&self) -> &'static str {
        match self {
            Self::Psk => "psk",
            Self::Dpsk => "dpsk",
            Self::Ask => "ask",
            Self::Qam => "qam",
            Self::Apsk => "apsk",
            Self::Arb => "arb",
            Self::ArbMirrored => "arb-mirrored",
            Self::ArbRotated => "arb-rotated",
            Self::Bpsk => "bpsk",
            Self::Qpsk => "qpsk",
            Self::Apsk16 => "apsk16",
            Self::Apsk32 => "apsk32",
            Self::Apsk64 => "apsk64",
        }
    }

    /// True for the user-defined constellation families
    pub fn is_arbitrary(&self) -> bool {
        matches!(self, Self::Arb | Self::ArbMirrored | Self::ArbRotated)
    }

    /// True when the constellation is defined over one quadrant only
    pub fn is_quadrant_reflected(&self) -> bool {
        matches!(self, Self::ArbMirrored | Self::ArbRotated)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ModemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name() == wanted)
            .ok_or_else(|| ModemError::UnsupportedScheme(s.to_string()))
    }
}

impl TryFrom<u32> for Scheme {
    type Error = ModemError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        tag.checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize).copied())
            .ok_or_else(|| ModemError::UnsupportedScheme(format!("tag {tag}")))
    }
}

/// Result of demodulating one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Demodulation {
    /// Recovered symbol index
    pub symbol: u32,
    /// Phase of the received sample relative to the decided point (radians)
    pub phase_error: f32,
    /// Error vector magnitude against the decided point
    pub evm: f32,
}

/// Diagnostic summary returned by `Modem::describe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModemInfo {
    pub scheme: Scheme,
    pub bits_per_symbol: u32,
}
