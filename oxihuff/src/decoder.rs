//! Huffman decoder (decompression).
//!
//! Decoding walks the tree from the root one input bit at a time. Reaching an
//! ordinary leaf emits its byte and restarts at the root, so several symbols
//! may resolve out of a single input byte. Reaching the terminator leaf ends
//! the stream; pad bits and any bytes after it are ignored.

use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};
use oxihuff_core::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{BufReader, BufWriter, Read, Write};
use tracing::{debug, trace, warn};

/// Decoder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Reading bits towards the next leaf.
    Accumulating,
    /// Terminator decoded.
    Done,
}

/// Byte counts of a finished decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {
    /// Compressed bytes consumed, up to and including the terminator's last byte.
    pub input_bytes: u64,
    /// Decoded bytes written.
    pub output_bytes: u64,
}

/// Resolves a packed bit stream back into bytes by walking a Huffman tree.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder {
    tree: HuffmanTree,
}

impl HuffmanDecoder {
    /// Create a decoder for the given tree.
    pub fn new(tree: HuffmanTree) -> Self {
        Self { tree }
    }

    /// The tree in use.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Decode `input` until the terminator symbol.
    ///
    /// The sink is consumed: decoded bytes are flushed and the sink dropped on
    /// every exit path.
    ///
    /// # Errors
    ///
    /// `CorruptStream` when the input ends before the terminator or a bit has
    /// no path in the tree (stream built from another weight table).
    pub fn decode<R: Read, W: Write>(&self, input: R, output: W) -> Result<DecodeSummary> {
        let mut reader = BitReader::new(BufReader::new(input));
        let mut out = BufWriter::new(output);

        match self.decode_symbols(&mut reader, &mut out) {
            Ok(output_bytes) => {
                out.flush()?;
                let summary = DecodeSummary {
                    input_bytes: reader.bytes_read(),
                    output_bytes,
                };
                debug!(
                    input = summary.input_bytes,
                    output = summary.output_bytes,
                    pad_bits = reader.bits_remaining(),
                    "decode finished"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(%err, "decode aborted");
                if let Err(flush_err) = out.flush() {
                    debug!(%flush_err, "flush after aborted decode failed");
                }
                Err(err)
            }
        }
    }

    fn decode_symbols<R: Read, W: Write>(
        &self,
        reader: &mut BitReader<R>,
        out: &mut W,
    ) -> Result<u64> {
        let root = self.tree.root();
        let mut node = root;
        let mut state = DecodeState::Accumulating;
        let mut unresolved = 0u32;
        let mut written = 0u64;

        while state == DecodeState::Accumulating {
            let Some(bit) = reader.read_bit()? else {
                let message = if unresolved > 0 {
                    format!("stream truncated with {unresolved} unresolved bits")
                } else {
                    "stream ended before the terminator".to_string()
                };
                return Err(OxiHuffError::corrupt(reader.bytes_read(), message));
            };

            // A single-leaf tree has the one code `0` and nothing else.
            let next = match node.child(bit) {
                Some(child) => child,
                None if !bit => node,
                None => {
                    return Err(OxiHuffError::corrupt(
                        reader.bytes_read().saturating_sub(1),
                        "bit 1 has no path in a single-symbol code",
                    ));
                }
            };

            match next {
                Node::Leaf { symbol, .. } => {
                    state = self.emit(*symbol, out, &mut written)?;
                    node = root;
                    unresolved = 0;
                }
                Node::Internal { .. } => {
                    node = next;
                    unresolved += 1;
                }
            }
        }

        Ok(written)
    }

    fn emit<W: Write>(
        &self,
        symbol: Symbol,
        out: &mut W,
        written: &mut u64,
    ) -> Result<DecodeState> {
        match symbol.byte() {
            None => Ok(DecodeState::Done),
            Some(byte) => {
                trace!(%symbol, "decoded");
                out.write_all(&[byte])?;
                *written += 1;
                Ok(DecodeState::Accumulating)
            }
        }
    }

    /// Decode an in-memory buffer.
    pub fn decode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() * 2);
        self.decode(data, &mut output)?;
        Ok(output)
    }
}
