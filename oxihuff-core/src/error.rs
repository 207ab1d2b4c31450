//! Error types for OxiHuff operations.
//!
//! Every failure of the codec aborts the whole operation; there is no
//! partial-result mode. Variants carry enough context (line, symbol, byte
//! offset) for the front end to produce a useful message.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed persisted weight data.
    #[error("Invalid weight data at line {line}: {message}")]
    Format {
        /// 1-based line number of the offending record.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Input byte has no code in the active code table.
    #[error("Unencodable symbol {symbol} at input offset {offset}")]
    UnencodableSymbol {
        /// The byte value (or terminator index) without a code.
        symbol: u16,
        /// Byte offset in the input where it was found.
        offset: u64,
    },

    /// Compressed input cannot be resolved to a valid code path.
    #[error("Corrupt stream at byte offset {offset}: {message}")]
    CorruptStream {
        /// Byte offset in the compressed input where decoding failed.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Attempt to build codes from an empty or invalid weight set.
    #[error("Invalid codec configuration: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create a weight format error.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create an unencodable symbol error.
    pub fn unencodable(symbol: u16, offset: u64) -> Self {
        Self::UnencodableSymbol { symbol, offset }
    }

    /// Create a corrupt stream error.
    pub fn corrupt(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptStream {
            offset,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
