//! Modem profiles
//!
//! A ModemConfig is a saved description of a modem: the scheme, its width and,
//! for arbitrary schemes, where the constellation points live on disk.
//! `ModemConfig::build` turns a profile into a ready-to-use modem.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::ModemResult;
use super::types::Scheme;
use crate::modem::Modem;

/// A saved modem profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModemConfig {
    /// Modulation family
    pub scheme: Scheme,
    /// Bits per symbol (ignored by the fixed-width BPSK/QPSK schemes)
    pub bits_per_symbol: u32,
    /// Text file holding the points of an arbitrary constellation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation_file: Option<PathBuf>,
}

impl ModemConfig {
    pub fn new(scheme: Scheme, bits_per_symbol: u32) -> Self {
        Self {
            scheme,
            bits_per_symbol,
            constellation_file: None,
        }
    }

    /// Attach a constellation file (arbitrary schemes only)
    pub fn with_constellation_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.constellation_file = Some(path.into());
        self
    }

    /// Create the modem this profile describes, loading its constellation
    /// file when one is set
    pub fn build(&self) -> ModemResult<Modem> {
        Modem::from_config(self)
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self::new(Scheme::Qpsk, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModemError;

    #[test]
    fn default_configuration_has_sensible_values() {
        let config = ModemConfig::default();
        assert_eq!(config.scheme, Scheme::Qpsk);
        assert_eq!(config.bits_per_symbol, 2);
        assert!(config.constellation_file.is_none());
    }

    #[test]
    fn configuration_serializes_to_json() {
        let config = ModemConfig::new(Scheme::Qam, 6);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"scheme\":\"qam\""));
        assert!(json.contains("\"bits_per_symbol\":6"));
        assert!(!json.contains("constellation_file"));
    }

    #[test]
    fn configuration_round_trips_with_file() {
        let config = ModemConfig::new(Scheme::Arb, 4).with_constellation_file("/tmp/points.txt");
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: ModemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_file_field_deserializes_as_none() {
        let config: ModemConfig =
            serde_json::from_str(r#"{"scheme":"apsk","bits_per_symbol":5}"#).unwrap();
        assert_eq!(config.scheme, Scheme::Apsk);
        assert!(config.constellation_file.is_none());
    }

    #[test]
    fn build_creates_the_described_modem() {
        let modem = ModemConfig::new(Scheme::Qam, 4).build().unwrap();
        assert_eq!(modem.scheme(), Scheme::Qam);
        assert_eq!(modem.bits_per_symbol(), 4);
        assert_eq!(modem.constellation_size(), 16);
        assert!(modem.is_ready());

        let arb = ModemConfig::new(Scheme::Arb, 3).build().unwrap();
        assert!(!arb.is_ready());
    }

    #[test]
    fn build_rejects_an_invalid_width() {
        assert!(matches!(
            ModemConfig::new(Scheme::Psk, 0).build(),
            Err(ModemError::InvalidConfig(_))
        ));
    }
}
