//! # OxiHuff Core
//!
//! Core components for the OxiHuff character-level Huffman codec.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and the command-line front end:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiHuff is layered as follows:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     oxihuff CLI (weights, encode, decode, codes)        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     WeightTable, HuffmanTree, CodeTable, Encoder/Decoder│
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, OxiHuffError                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//!
//! let mut output = Vec::new();
//! let mut writer = BitWriter::new(&mut output);
//! writer.write_wide_bits(0b101, 3).unwrap();
//! writer.flush().unwrap();
//! drop(writer);
//! assert_eq!(output, vec![0b1010_0000]);
//!
//! let mut reader = BitReader::new(&output[..]);
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};

