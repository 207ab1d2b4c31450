//! # OxiHuff
//!
//! Pure Rust character-level Huffman compression.
//!
//! A prefix code is derived from per-symbol occurrence counts over a fixed
//! alphabet: the 128 standard character codes plus a reserved terminator
//! symbol. Encoding packs the codes MSB-first into bytes and ends the stream
//! with the terminator code; decoding walks the code tree bit by bit until it
//! reaches the terminator.
//!
//! ## Pipeline
//!
//! ```text
//! WeightTable ──▶ HuffmanTree ──▶ CodeTable ──▶ HuffmanEncoder ──▶ bits
//!                     │
//!                     └────────────────────────▶ HuffmanDecoder ──▶ bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff::{CodecConfig, WeightTable, compress, decompress};
//!
//! let text = b"TOBEORNOTTOBEORTOBEORNOT";
//! let weights = WeightTable::from_bytes(text);
//!
//! let compressed = compress(text, &weights, CodecConfig::DEFAULT).unwrap();
//! let decompressed = decompress(&compressed, &weights, CodecConfig::DEFAULT).unwrap();
//!
//! assert_eq!(decompressed, text);
//! ```
//!
//! ## Persisted weights
//!
//! The decoder needs the same weight table as the encoder. Tables are stored
//! as text, one `index,count,` record per symbol:
//!
//! ```rust
//! use oxihuff::WeightTable;
//!
//! let weights = WeightTable::from_bytes(b"hello");
//! let mut text = Vec::new();
//! weights.to_persisted(&mut text).unwrap();
//!
//! let restored = WeightTable::from_persisted(&text[..]).unwrap();
//! assert_eq!(restored, weights);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod codes;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod symbol;
pub mod tree;
pub mod weights;

pub use codec::HuffmanCodec;
pub use codes::{Code, CodeTable};
pub use config::CodecConfig;
pub use decoder::{DecodeState, DecodeSummary, HuffmanDecoder};
pub use encoder::{EncodeSummary, HuffmanEncoder};
pub use oxihuff_core::error::{OxiHuffError, Result};
pub use symbol::{ALPHABET_SIZE, SYMBOL_COUNT, Symbol};
pub use tree::{HuffmanTree, Node, TieBreak};
pub use weights::WeightTable;

/// Compress `data` with codes built from `weights`.
///
/// # Example
///
/// ```rust
/// use oxihuff::{CodecConfig, WeightTable, compress};
///
/// let data = b"abracadabra";
/// let weights = WeightTable::from_bytes(data);
/// let compressed = compress(data, &weights, CodecConfig::OPTIMIZED).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8], weights: &WeightTable, config: CodecConfig) -> Result<Vec<u8>> {
    HuffmanCodec::new(weights, config)?.encode_to_vec(data)
}

/// Decompress `data` with the tree built from `weights`.
///
/// `weights` and `config` must match the ones used to compress.
pub fn decompress(data: &[u8], weights: &WeightTable, config: CodecConfig) -> Result<Vec<u8>> {
    HuffmanCodec::new(weights, config)?.decode_to_vec(data)
}
