//! Codec configuration.

use crate::tree::TieBreak;

/// Huffman codec configuration parameters.
///
/// Encoder and decoder must use the same configuration: the tie-break policy
/// changes code assignment, so a stream encoded under one policy does not
/// decode under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    /// How equal weights are ordered during tree construction.
    pub tie_break: TieBreak,
}

impl CodecConfig {
    /// Ties resolved by symbol index.
    pub const DEFAULT: Self = Self {
        tie_break: TieBreak::SymbolOrder,
    };

    /// Ties resolved towards the shallowest tree.
    pub const OPTIMIZED: Self = Self {
        tie_break: TieBreak::Balanced,
    };

    /// Create a configuration from the `optimize` switch.
    pub fn new(optimize_ties: bool) -> Self {
        Self {
            tie_break: TieBreak::from_optimize(optimize_ties),
        }
    }

    /// Whether tie optimization is enabled.
    pub fn optimize_ties(&self) -> bool {
        self.tie_break == TieBreak::Balanced
    }
}
