//! The fixed symbol alphabet.
//!
//! Symbols 0-127 are the standard character codes. The terminator lives at
//! index 128, outside the byte range it shares the table with, so a NUL byte
//! in the input is an ordinary symbol.

use serde::Serialize;
use std::fmt;

/// Number of ordinary character codes.
pub const ALPHABET_SIZE: usize = 128;

/// Number of slots in a weight table (characters plus terminator).
pub const SYMBOL_COUNT: usize = ALPHABET_SIZE + 1;

/// One encodable unit: a character code or the terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(u8);

impl Symbol {
    /// End-of-stream marker.
    pub const TERMINATOR: Self = Self(ALPHABET_SIZE as u8);

    /// Map an input byte to its symbol; bytes >= 128 have none.
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        ((byte as usize) < ALPHABET_SIZE).then_some(Self(byte))
    }

    /// Symbol for a weight table index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SYMBOL_COUNT).then_some(Self(index as u8))
    }

    /// Weight table index of this symbol.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The underlying byte, or `None` for the terminator.
    #[inline]
    pub fn byte(self) -> Option<u8> {
        (!self.is_terminator()).then_some(self.0)
    }

    /// Whether this is the end-of-stream marker.
    #[inline]
    pub fn is_terminator(self) -> bool {
        self == Self::TERMINATOR
    }

    /// Iterate over every symbol in index order, terminator last.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..SYMBOL_COUNT).map(|i| Symbol(i as u8))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0..=31 | 127 => write!(f, "[{}]", self.0),
            128 => write!(f, "EOF"),
            c => write!(f, "'{}'", c as char),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte() {
        assert_eq!(Symbol::from_byte(b'A').map(Symbol::index), Some(65));
        assert_eq!(Symbol::from_byte(0).map(Symbol::index), Some(0));
        assert!(Symbol::from_byte(128).is_none());
        assert!(Symbol::from_byte(255).is_none());
    }

    #[test]
    fn test_terminator_is_distinct() {
        let nul = Symbol::from_byte(0).unwrap();
        assert!(!nul.is_terminator());
        assert_eq!(nul.byte(), Some(0));
        assert!(Symbol::TERMINATOR.is_terminator());
        assert_eq!(Symbol::TERMINATOR.byte(), None);
        assert_eq!(Symbol::TERMINATOR.index(), 128);
    }

    #[test]
    fn test_all_and_display() {
        assert_eq!(Symbol::all().count(), SYMBOL_COUNT);
        assert_eq!(Symbol::from_byte(b'x').unwrap().to_string(), "'x'");
        assert_eq!(Symbol::from_byte(10).unwrap().to_string(), "[10]");
        assert_eq!(Symbol::TERMINATOR.to_string(), "EOF");
        assert!(Symbol::from_index(SYMBOL_COUNT).is_none());
    }
}
