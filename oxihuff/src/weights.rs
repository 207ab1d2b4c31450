//! Symbol weight tables.
//!
//! A [`WeightTable`] holds one occurrence count per symbol slot, including the
//! terminator. Tables come from frequency analysis of a source stream or from
//! the persisted text format:
//!
//! ```text
//! 0,0,
//! 1,0,
//! ...
//! 65,3,
//! ...
//! 128,1,
//! ```
//!
//! One `index,count,` record per line, ascending, no gaps.

use crate::symbol::{SYMBOL_COUNT, Symbol};
use oxihuff_core::error::{OxiHuffError, Result};
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};

/// Per-symbol occurrence counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: [u64; SYMBOL_COUNT],
}

impl WeightTable {
    /// Create a table with every weight at zero.
    pub fn new() -> Self {
        Self {
            weights: [0; SYMBOL_COUNT],
        }
    }

    /// Count symbol occurrences in a byte source.
    ///
    /// Reads until exhaustion. Bytes outside the character range are ignored.
    /// The terminator slot is set to 1, since every stream carries exactly one.
    pub fn from_source<R: Read>(source: R) -> Result<Self> {
        let mut table = Self::new();
        for byte in BufReader::new(source).bytes() {
            if let Some(symbol) = Symbol::from_byte(byte?) {
                table.weights[symbol.index()] += 1;
            }
        }
        table.weights[Symbol::TERMINATOR.index()] = 1;
        Ok(table)
    }

    /// Count symbol occurrences in an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for symbol in data.iter().copied().filter_map(Symbol::from_byte) {
            table.weights[symbol.index()] += 1;
        }
        table.weights[Symbol::TERMINATOR.index()] = 1;
        table
    }

    /// Parse the persisted `index,count,` line format.
    ///
    /// Exactly one record per symbol index is required, in ascending order.
    /// Blank lines and line-end whitespace are skipped; inside a record only
    /// ASCII digits and the two commas are accepted.
    pub fn from_persisted<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut expected = 0usize;
        let mut line_no = 0usize;
        let mut raw = Vec::new();

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            line_no += 1;

            let line = std::str::from_utf8(&raw)
                .map_err(|_| OxiHuffError::format(line_no, "invalid UTF-8"))?;
            let record = line.trim();
            if record.is_empty() {
                continue;
            }

            let (index, count) = parse_record(record).ok_or_else(|| {
                OxiHuffError::format(line_no, format!("expected `index,count,`, found {record:?}"))
            })?;

            if index >= SYMBOL_COUNT {
                return Err(OxiHuffError::format(
                    line_no,
                    format!("index {index} out of range 0..{SYMBOL_COUNT}"),
                ));
            }
            if index < expected {
                return Err(OxiHuffError::format(
                    line_no,
                    format!("index {index} duplicated or out of order"),
                ));
            }
            if index > expected {
                return Err(OxiHuffError::format(
                    line_no,
                    format!("missing index {expected}"),
                ));
            }

            table.weights[index] = count;
            expected += 1;
        }

        if expected != SYMBOL_COUNT {
            return Err(OxiHuffError::format(
                line_no + 1,
                format!("expected {SYMBOL_COUNT} records, found {expected}"),
            ));
        }

        Ok(table)
    }

    /// Parse the persisted format from a string.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_persisted(text.as_bytes())
    }

    /// Write the persisted format: one `index,count,` line per symbol.
    pub fn to_persisted<W: Write>(&self, mut writer: W) -> Result<()> {
        for (index, count) in self.weights.iter().enumerate() {
            writeln!(writer, "{index},{count},")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Weight of a symbol.
    #[inline]
    pub fn get(&self, symbol: Symbol) -> u64 {
        self.weights[symbol.index()]
    }

    /// Set the weight of a symbol.
    pub fn set(&mut self, symbol: Symbol, count: u64) {
        self.weights[symbol.index()] = count;
    }

    /// Builder-style [`WeightTable::set`].
    pub fn with(mut self, symbol: Symbol, count: u64) -> Self {
        self.set(symbol, count);
        self
    }

    /// Iterate over `(symbol, weight)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        Symbol::all().map(|s| (s, self.weights[s.index()]))
    }

    /// Sum of all weights (saturating).
    pub fn total(&self) -> u64 {
        self.weights.iter().fold(0u64, |acc, &w| acc.saturating_add(w))
    }

    /// Number of symbols with a nonzero weight.
    pub fn distinct_symbols(&self) -> usize {
        self.weights.iter().filter(|&&w| w > 0).count()
    }

    /// Whether every weight is zero.
    pub fn is_empty(&self) -> bool {
        self.weights.iter().all(|&w| w == 0)
    }

    /// Human-readable listing, one symbol per line.
    ///
    /// Non-printing characters are shown as `[ ]`.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (symbol, count) in self.iter() {
            let line = match symbol.index() {
                i if i < 32 || i == 127 => format!("i:{i} [ ] = {count}\n"),
                i if symbol.is_terminator() => format!("i:{i} EOF = {count}\n"),
                i => format!("i:{i} ({}) = {count}\n", i as u8 as char),
            };
            out.push_str(&line);
        }
        out
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WeightTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, count) in self.weights.iter().enumerate() {
            writeln!(f, "{index},{count},")?;
        }
        Ok(())
    }
}

/// Split `index,count,` into its two numbers.
fn parse_record(record: &str) -> Option<(usize, u64)> {
    let body = record.strip_suffix(',')?;
    let (index, count) = body.split_once(',')?;
    Some((parse_digits(index)?, parse_digits(count)?))
}

fn parse_digits<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
