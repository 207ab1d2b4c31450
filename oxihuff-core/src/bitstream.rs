//! Bit-level I/O operations for the Huffman codec.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! variable-length codes one bit at a time.
//!
//! # Bit Ordering
//!
//! OxiHuff streams are MSB-first (Most Significant Bit first): the first code
//! bit emitted lands in bit 7 of the first byte. A final partial byte is padded
//! with zero bits.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//!
//! // Writing a 3-bit and a 4-bit code
//! let mut output = Vec::new();
//! let mut writer = BitWriter::new(&mut output);
//! writer.write_wide_bits(0b101, 3).unwrap();
//! writer.write_wide_bits(0b1100, 4).unwrap();
//! writer.flush().unwrap();
//! assert_eq!(writer.bytes_written(), 1);
//! drop(writer);
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading them back bit by bit
//! let mut reader = BitReader::new(&output[..]);
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! assert_eq!(reader.read_bit().unwrap(), Some(false));
//! assert_eq!(reader.bits_remaining(), 6);
//! ```

use crate::error::Result;
use std::io::{self, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader one at a time; the unconsumed
/// bits of the current byte form the residual. Running out of input is not an
/// error at this level: [`BitReader::read_bit`] reports it as `None` and the
/// caller decides whether that is a clean end or a truncated stream.
///
/// Wrap unbuffered sources (files, sockets) in a `BufReader`.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Residual bits, left-aligned (MSB is the next bit).
    buffer: u8,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bytes pulled from the reader.
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            bytes_read: 0,
        }
    }

    /// Get the number of bytes pulled from the underlying reader.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Number of residual bits buffered from the current byte.
    pub fn bits_remaining(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Pull the next byte into the buffer. Returns `false` at end of input.
    fn refill(&mut self) -> Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.buffer = byte[0];
                    self.bits_in_buffer = 8;
                    self.bytes_read += 1;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a single bit, or `None` once the input is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_in_buffer == 0 && !self.refill()? {
            return Ok(None);
        }

        let bit = self.buffer & 0x80 != 0;
        self.buffer <<= 1;
        self.bits_in_buffer -= 1;

        Ok(Some(bit))
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and writes each byte to
/// the underlying writer as soon as it is complete. Call [`BitWriter::flush`]
/// when done to pad and write the final partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Pending bits, right-aligned (LSB is the most recent bit).
    buffer: u8,
    /// Number of pending bits in buffer (always < 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written (excluding padding).
    total_bits_written: u64,
    /// Total bytes handed to the writer.
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
            bytes_written: 0,
        }
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get the total number of bits written so far (excluding padding).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Get the number of whole bytes emitted so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[inline]
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buffer = (self.buffer << 1) | bit as u8;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.writer.write_all(&[self.buffer])?;
            self.bytes_written += 1;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        Ok(())
    }

    /// Write up to 128 bits to the stream, most significant bit first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write (right-aligned)
    /// * `count` - Number of bits to write (0-128)
    ///
    /// Huffman codes over a 129-symbol alphabet can exceed 32 bits for
    /// heavily skewed weights.
    pub fn write_wide_bits(&mut self, value: u128, count: u8) -> Result<()> {
        debug_assert!(count <= 128, "Cannot write more than 128 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 != 0)?;
        }

        Ok(())
    }

    /// Pad any partial byte with zeros and flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            let byte = self.buffer << padding;
            self.writer.write_all(&[byte])?;
            self.bytes_written += 1;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        self.writer.flush()?;
        Ok(())
    }
}
