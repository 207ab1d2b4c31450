//! Huffman encoder (compression).

use crate::codes::CodeTable;
use crate::symbol::Symbol;
use oxihuff_core::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{BufReader, Read, Write};
use tracing::{debug, warn};

/// Byte counts of a finished encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {
    /// Bytes consumed from the source.
    pub input_bytes: u64,
    /// Bytes written to the sink, final padded byte included.
    pub output_bytes: u64,
    /// Code bits written, terminator included, padding excluded.
    pub bits_written: u64,
}

impl EncodeSummary {
    /// Output size as a fraction of input size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Streams bytes through a code table into a packed bit stream.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    codes: CodeTable,
}

impl HuffmanEncoder {
    /// Create an encoder for the given code table.
    pub fn new(codes: CodeTable) -> Self {
        Self { codes }
    }

    /// The code table in use.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Encode `input` until exhaustion, then append the terminator code.
    ///
    /// # Algorithm
    ///
    /// 1. Map each input byte to its symbol and look up its code
    /// 2. Append the code bits to the bit writer, which emits every full byte
    /// 3. At end of input append the terminator code
    /// 4. Zero-pad the final partial byte and flush
    ///
    /// The sink is consumed: it is flushed and dropped on every exit path.
    ///
    /// # Errors
    ///
    /// `UnencodableSymbol` for a byte outside the alphabet or with zero weight.
    /// Output written before the failure is left in place but is incomplete.
    pub fn encode<R: Read, W: Write>(&self, input: R, output: W) -> Result<EncodeSummary> {
        let mut writer = BitWriter::new(output);

        match self.encode_symbols(input, &mut writer) {
            Ok(input_bytes) => {
                let bits_written = writer.bits_written();
                writer.flush()?;
                let summary = EncodeSummary {
                    input_bytes,
                    output_bytes: writer.bytes_written(),
                    bits_written,
                };
                debug!(
                    input = summary.input_bytes,
                    output = summary.output_bytes,
                    bits = summary.bits_written,
                    "encode finished"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(%err, "encode aborted");
                if let Err(flush_err) = writer.get_mut().flush() {
                    debug!(%flush_err, "flush after aborted encode failed");
                }
                Err(err)
            }
        }
    }

    fn encode_symbols<R: Read, W: Write>(
        &self,
        input: R,
        writer: &mut BitWriter<W>,
    ) -> Result<u64> {
        let mut offset = 0u64;

        for byte in BufReader::new(input).bytes() {
            let byte = byte?;
            let symbol = Symbol::from_byte(byte)
                .ok_or_else(|| OxiHuffError::unencodable(byte as u16, offset))?;
            let code = self.codes.code_for(symbol, offset)?;
            writer.write_wide_bits(code.bits(), code.len())?;
            offset += 1;
        }

        let terminator = self.codes.code_for(Symbol::TERMINATOR, offset)?;
        writer.write_wide_bits(terminator.bits(), terminator.len())?;

        Ok(offset)
    }

    /// Encode an in-memory buffer.
    pub fn encode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() / 2 + 1);
        self.encode(data, &mut output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{HuffmanTree, TieBreak};
    use crate::weights::WeightTable;

    fn encoder_for(weights: &WeightTable) -> HuffmanEncoder {
        let tree = HuffmanTree::build(weights, TieBreak::SymbolOrder).unwrap();
        HuffmanEncoder::new(CodeTable::derive(&tree).unwrap())
    }

    #[test]
    fn test_encode_known_bits() {
        // A:3 B:1 C:1 EOF:1 -> A=0, EOF=10, B=110, C=111
        let encoder = encoder_for(&WeightTable::from_bytes(b"AAABC"));
        let out = encoder.encode_to_vec(b"AAAB").unwrap();
        // 0 0 0 110 10 fills exactly one byte
        assert_eq!(out, vec![0b0001_1010]);
    }

    #[test]
    fn test_encode_summary() {
        let encoder = encoder_for(&WeightTable::from_bytes(b"AAABC"));
        let mut out = Vec::new();
        let summary = encoder.encode(&b"AAABCC"[..], &mut out).unwrap();
        // 1+1+1+3+3+3 data bits + 2 terminator bits
        assert_eq!(summary.bits_written, 14);
        assert_eq!(summary.input_bytes, 6);
        assert_eq!(summary.output_bytes, 2);
        assert_eq!(out.len(), 2);
        assert!(summary.ratio() < 1.0);
    }

    #[test]
    fn test_encode_empty_input() {
        let encoder = encoder_for(&WeightTable::from_bytes(b"AAABC"));
        let out = encoder.encode_to_vec(b"").unwrap();
        assert_eq!(out, vec![0b1000_0000]);
    }

    #[test]
    fn test_zero_weight_symbol_aborts() {
        let encoder = encoder_for(&WeightTable::from_bytes(b"AAABC"));
        let err = encoder.encode_to_vec(b"AABZA").unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::UnencodableSymbol {
                symbol: 90,
                offset: 3
            }
        ));
    }

    #[test]
    fn test_out_of_alphabet_byte_aborts() {
        let encoder = encoder_for(&WeightTable::from_bytes(b"abc"));
        let err = encoder.encode_to_vec("ab\u{e9}".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::UnencodableSymbol {
                symbol: 0xC3,
                offset: 2
            }
        ));
    }
}
