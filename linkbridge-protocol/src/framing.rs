//! Splitting a byte stream into link words and reassembling it.
//!
//! Word format (MSB clocked first):
//! - bits 31..24: stream byte `offset`
//! - bits 23..16: stream byte `offset + 1`
//! - bits 15..8:  stream byte `offset + 2`
//! - bits 7..0:   stream byte `offset + 3`
//!
//! Positions past the end of the stream are zero. The receiver cannot tell
//! padding from literal NUL bytes; text consumers stop at the first NUL.

use heapless::Vec;

use crate::word::{LinkWord, WORD_BYTES};

/// Errors that can occur while framing or reassembling a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramingError {
    /// Encoding offset is at or past the end of the stream
    OffsetOutOfRange,
    /// Reassembly buffer has no room for another word
    BufferFull,
}

/// Encode the (up to) four bytes starting at `offset` into one word
///
/// Missing trailing bytes are zero-filled, never taken from stale memory.
pub fn encode_word(stream: &[u8], offset: usize) -> Result<LinkWord, FramingError> {
    if offset >= stream.len() {
        return Err(FramingError::OffsetOutOfRange);
    }

    let end = (offset + WORD_BYTES).min(stream.len());
    let mut bytes = [0u8; WORD_BYTES];
    bytes[..end - offset].copy_from_slice(&stream[offset..end]);

    Ok(LinkWord::from_bytes(bytes))
}

/// Decode a received word into its four payload bytes
///
/// Returns `None` for the sentinel, which carries no payload.
pub fn decode_word(word: LinkWord) -> Option<[u8; WORD_BYTES]> {
    if word.is_sentinel() {
        None
    } else {
        Some(word.to_bytes())
    }
}

/// Number of leading bytes before the first NUL
///
/// This is how much of a decoded word a text console prints.
pub fn text_len(bytes: &[u8; WORD_BYTES]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(WORD_BYTES)
}

/// Iterator over the words of a byte stream
///
/// Yields `ceil(len / 4)` words; the last one is zero-filled.
#[derive(Debug, Clone)]
pub struct WordSegmenter<'a> {
    stream: &'a [u8],
    offset: usize,
}

impl<'a> WordSegmenter<'a> {
    /// Create a segmenter over `stream`
    pub fn new(stream: &'a [u8]) -> Self {
        Self { stream, offset: 0 }
    }

    /// Byte offset of the next word to be produced
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of words a stream of `len` bytes occupies
    pub const fn word_count(len: usize) -> usize {
        len.div_ceil(WORD_BYTES)
    }
}

impl Iterator for WordSegmenter<'_> {
    type Item = LinkWord;

    fn next(&mut self) -> Option<Self::Item> {
        let word = encode_word(self.stream, self.offset).ok()?;
        self.offset += WORD_BYTES;
        Some(word)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Self::word_count(self.stream.len().saturating_sub(self.offset));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WordSegmenter<'_> {}

/// Receiver-side reassembly of payload words into a bounded buffer
#[derive(Debug, Clone, Default)]
pub struct StreamAssembler<const N: usize> {
    buffer: Vec<u8, N>,
    idle_words: usize,
}

impl<const N: usize> StreamAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            idle_words: 0,
        }
    }

    /// Feed one received word
    ///
    /// Sentinels are counted and skipped. Returns the number of payload
    /// bytes appended (0 or 4).
    pub fn push(&mut self, word: LinkWord) -> Result<usize, FramingError> {
        match decode_word(word) {
            None => {
                self.idle_words += 1;
                Ok(0)
            }
            Some(bytes) => {
                self.buffer
                    .extend_from_slice(&bytes)
                    .map_err(|_| FramingError::BufferFull)?;
                Ok(WORD_BYTES)
            }
        }
    }

    /// All payload bytes received so far, padding included
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Payload bytes truncated to the sender's stream length
    pub fn truncated(&self, len: usize) -> &[u8] {
        &self.buffer[..len.min(self.buffer.len())]
    }

    /// Number of sentinel words seen
    pub fn idle_words(&self) -> usize {
        self.idle_words
    }

    /// Discard everything received
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.idle_words = 0;
    }
}
