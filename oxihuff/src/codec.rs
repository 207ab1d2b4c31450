//! Encoder/decoder pair built from one weight table.

use crate::codes::CodeTable;
use crate::config::CodecConfig;
use crate::decoder::{DecodeSummary, HuffmanDecoder};
use crate::encoder::{EncodeSummary, HuffmanEncoder};
use crate::tree::HuffmanTree;
use crate::weights::WeightTable;
use oxihuff_core::error::Result;
use std::io::{Read, Write};

/// A Huffman codec for one session.
///
/// Building the codec constructs the tree and derives the code table once;
/// both are immutable afterwards.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    config: CodecConfig,
    encoder: HuffmanEncoder,
    decoder: HuffmanDecoder,
}

impl HuffmanCodec {
    /// Build the tree and code table for `weights`.
    ///
    /// # Errors
    ///
    /// `Configuration` if no symbol has a nonzero weight.
    pub fn new(weights: &WeightTable, config: CodecConfig) -> Result<Self> {
        let tree = HuffmanTree::build(weights, config.tie_break)?;
        let codes = CodeTable::derive(&tree)?;
        Ok(Self {
            config,
            encoder: HuffmanEncoder::new(codes),
            decoder: HuffmanDecoder::new(tree),
        })
    }

    /// Configuration the codec was built with.
    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// The Huffman tree.
    pub fn tree(&self) -> &HuffmanTree {
        self.decoder.tree()
    }

    /// The derived code table.
    pub fn codes(&self) -> &CodeTable {
        self.encoder.codes()
    }

    /// Encode a byte stream. See [`HuffmanEncoder::encode`].
    pub fn encode<R: Read, W: Write>(&self, input: R, output: W) -> Result<EncodeSummary> {
        self.encoder.encode(input, output)
    }

    /// Decode a byte stream. See [`HuffmanDecoder::decode`].
    pub fn decode<R: Read, W: Write>(&self, input: R, output: W) -> Result<DecodeSummary> {
        self.decoder.decode(input, output)
    }

    /// Encode an in-memory buffer.
    pub fn encode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.encoder.encode_to_vec(data)
    }

    /// Decode an in-memory buffer.
    pub fn decode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.decoder.decode_to_vec(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxihuff_core::OxiHuffError;

    #[test]
    fn test_codec_roundtrip() {
        let text = b"Peter Piper picked a peck of pickled peppers.";
        let codec =
            HuffmanCodec::new(&WeightTable::from_bytes(text), CodecConfig::DEFAULT).unwrap();
        let encoded = codec.encode_to_vec(text).unwrap();
        assert!(encoded.len() < text.len());
        assert_eq!(codec.decode_to_vec(&encoded).unwrap(), text);
    }

    #[test]
    fn test_codec_exposes_tree_and_codes() {
        let codec =
            HuffmanCodec::new(&WeightTable::from_bytes(b"abcabc"), CodecConfig::OPTIMIZED)
                .unwrap();
        assert_eq!(codec.tree().leaf_count(), codec.codes().len());
        assert!(codec.config().optimize_ties());
    }

    #[test]
    fn test_codec_all_zero() {
        let err = HuffmanCodec::new(&WeightTable::new(), CodecConfig::DEFAULT).unwrap_err();
        assert!(matches!(err, OxiHuffError::Configuration { .. }));
    }
}
