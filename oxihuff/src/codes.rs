//! Code table derivation.
//!
//! A [`CodeTable`] maps every leaf symbol of a [`HuffmanTree`] to the path that
//! reaches it: `0` for a left descent, `1` for a right descent. Only leaves get
//! codes, so the table is prefix-free by construction.

use crate::symbol::{SYMBOL_COUNT, Symbol};
use crate::tree::{HuffmanTree, Node};
use crate::weights::WeightTable;
use oxihuff_core::error::{OxiHuffError, Result};
use std::fmt;

/// Longest representable code.
pub const MAX_CODE_LENGTH: u8 = 128;

/// A Huffman code: `len` bits, right-aligned in `bits`, first bit most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// Create a code from right-aligned bits.
    pub fn new(bits: u128, len: u8) -> Self {
        debug_assert!(len <= MAX_CODE_LENGTH);
        let mask = if len >= 128 { u128::MAX } else { (1u128 << len) - 1 };
        Self {
            bits: bits & mask,
            len,
        }
    }

    /// Code bits, right-aligned.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether the code has no bits (never true for a derived code).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `position`, counting from the first emitted bit.
    pub fn bit(&self, position: u8) -> bool {
        debug_assert!(position < self.len);
        (self.bits >> (self.len - 1 - position)) & 1 != 0
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && other
                .bits
                .checked_shr((other.len - self.len) as u32)
                .unwrap_or(0)
                == self.bits
    }

    fn child(self, bit: bool) -> Result<Self> {
        if self.len >= MAX_CODE_LENGTH {
            return Err(OxiHuffError::configuration(format!(
                "tree deeper than {MAX_CODE_LENGTH} levels"
            )));
        }
        Ok(Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        })
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in 0..self.len {
            f.write_str(if self.bit(position) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// Derive codes by walking the tree once.
    ///
    /// A single-leaf tree assigns its symbol the one-bit code `0`.
    pub fn derive(tree: &HuffmanTree) -> Result<Self> {
        if tree.leaf_count() == 0 {
            return Err(OxiHuffError::configuration("cannot derive codes from an empty tree"));
        }

        let mut table = Self {
            codes: [None; SYMBOL_COUNT],
        };

        match tree.root() {
            Node::Leaf { symbol, .. } => table.codes[symbol.index()] = Some(Code::new(0, 1)),
            root => table.assign(root, Code::new(0, 0))?,
        }

        Ok(table)
    }

    fn assign(&mut self, node: &Node, prefix: Code) -> Result<()> {
        match node {
            Node::Leaf { symbol, .. } => {
                self.codes[symbol.index()] = Some(prefix);
            }
            Node::Internal { left, right, .. } => {
                self.assign(left, prefix.child(false)?)?;
                self.assign(right, prefix.child(true)?)?;
            }
        }
        Ok(())
    }

    /// Code of a symbol, if it has a leaf.
    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes[symbol.index()].as_ref()
    }

    /// Code of a symbol found at input `offset`.
    ///
    /// # Errors
    ///
    /// `UnencodableSymbol` when the symbol had zero weight and has no leaf.
    pub fn code_for(&self, symbol: Symbol, offset: u64) -> Result<&Code> {
        self.get(symbol)
            .ok_or_else(|| OxiHuffError::unencodable(symbol.index() as u16, offset))
    }

    /// Iterate over `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        Symbol::all().filter_map(|s| self.get(s).map(|code| (s, code)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest code.
    pub fn max_length(&self) -> u8 {
        self.codes.iter().flatten().map(Code::len).max().unwrap_or(0)
    }

    /// Total bits needed to encode every weighted occurrence once.
    pub fn encoded_bits(&self, weights: &WeightTable) -> u64 {
        self.iter().fold(0u64, |acc, (symbol, code)| {
            acc.saturating_add(weights.get(symbol).saturating_mul(code.len() as u64))
        })
    }
}
