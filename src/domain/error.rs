//! Domain error types

use thiserror::Error;

use super::types::Scheme;

/// Errors that can occur while building or running a modem
#[derive(Error, Debug)]
pub enum ModemError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported modulation scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Scheme mismatch: {operation} is not available for {scheme} modems")]
    SchemeMismatch {
        operation: &'static str,
        scheme: Scheme,
    },

    #[error("Size mismatch: expected {expected} constellation points, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Symbol {symbol} out of range (alphabet has {limit} symbols)")]
    SymbolOutOfRange { symbol: u32, limit: u32 },

    #[error("No constellation loaded for {0} modem")]
    NotLoaded(Scheme),

    #[error("Constellation has zero energy and cannot be normalized")]
    DegenerateConstellation,
}

/// Result type alias for modem operations
pub type ModemResult<T> = Result<T, ModemError>;
