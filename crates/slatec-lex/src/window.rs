//! Sliding window over a chunked source read.
//!
//! The scanner never needs the whole file: it looks at the bytes of the
//! current lexeme plus bounded lookahead. [`SourceWindow`] buffers input in
//! chunks from any [`Read`] and discards bytes as lexemes are committed, so
//! memory stays proportional to the longest lexeme, not to the input.

use std::io::{self, Read};

/// Smallest chunk size the window supports.
pub const MIN_CHUNK_SIZE: usize = 16;

/// Default chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

pub struct SourceWindow<R> {
    reader: R,
    /// Unconsumed bytes of the source.
    buf: Vec<u8>,
    chunk_size: usize,
    /// True once the reader returned 0 bytes.
    exhausted: bool,
}

impl<R: Read> SourceWindow<R> {
    /// Window over `reader` with the given chunk size.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is below [`MIN_CHUNK_SIZE`].
    pub fn new(reader: R, chunk_size: usize) -> Self {
        assert!(
            chunk_size >= MIN_CHUNK_SIZE,
            "chunk size must be at least {MIN_CHUNK_SIZE} bytes"
        );
        Self {
            reader,
            buf: Vec::new(),
            chunk_size,
            exhausted: false,
        }
    }

    /// Read one chunk, appending to the buffer. Returns whether any bytes
    /// arrived.
    fn refill(&mut self) -> io::Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let start = self.buf.len();
        self.buf.resize(start + self.chunk_size, 0);
        let n = self.reader.read(&mut self.buf[start..])?;
        self.buf.truncate(start + n);
        if n == 0 {
            self.exhausted = true;
        }
        Ok(n > 0)
    }

    /// Decode the character at byte `offset` from the front of the window,
    /// refilling as needed. Returns the character and its width in bytes,
    /// or `None` at end of input. Bytes that are not valid UTF-8 decode as
    /// U+FFFD with width 1, which the scanner rejects as input outside the
    /// alphabet.
    pub fn char_at(&mut self, offset: usize) -> io::Result<Option<(char, usize)>> {
        // Enough bytes for the widest UTF-8 sequence, or true end of input.
        while !self.exhausted && self.buf.len() < offset + 4 {
            self.refill()?;
        }
        if offset >= self.buf.len() {
            return Ok(None);
        }
        let bytes = &self.buf[offset..];
        let width = match bytes[0] {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Ok(Some(('\u{FFFD}', 1))),
        };
        if bytes.len() < width {
            return Ok(Some(('\u{FFFD}', 1)));
        }
        match std::str::from_utf8(&bytes[..width]) {
            Ok(s) => {
                let c = s.chars().next().unwrap_or('\u{FFFD}');
                Ok(Some((c, width)))
            }
            Err(_) => Ok(Some(('\u{FFFD}', 1))),
        }
    }

    /// Remove the first `n` bytes from the window and return them as text
    /// (lossily decoded; the scanner only commits ranges it has walked).
    pub fn consume(&mut self, n: usize) -> String {
        let n = n.min(self.buf.len());
        let taken: Vec<u8> = self.buf.drain(..n).collect();
        String::from_utf8_lossy(&taken).into_owned()
    }

    /// Bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// True when the reader is drained and the buffer is empty.
    pub fn at_end(&self) -> bool {
        self.exhausted && self.buf.is_empty()
    }
}
