//! The 32-bit link word

/// Number of bits clocked per transfer
pub const WORD_BITS: u32 = 32;

/// Number of payload bytes carried by one word
pub const WORD_BYTES: usize = 4;

/// Reserved word meaning "no payload, link idle / resynchronize"
pub const SENTINEL: LinkWord = LinkWord(0xDEAD_B00F);

/// Atomic unit of transfer on the link
///
/// Bytes are packed big-endian: the first byte of a stream occupies the
/// most significant byte of the word, which is also the first byte on
/// the wire since bits go out MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkWord(pub u32);

impl LinkWord {
    /// Pack four bytes, first byte most significant
    pub const fn from_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Unpack into four bytes, most significant first
    pub const fn to_bytes(self) -> [u8; WORD_BYTES] {
        self.0.to_be_bytes()
    }

    /// Raw value as clocked on the wire
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true if this is the reserved idle/resync word
    pub const fn is_sentinel(self) -> bool {
        self.0 == SENTINEL.0
    }

    /// Bit at wire position `index` (0 = first bit clocked = MSB)
    pub const fn wire_bit(self, index: u32) -> bool {
        (self.0 >> (WORD_BITS - 1 - index)) & 1 == 1
    }
}

impl From<u32> for LinkWord {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<LinkWord> for u32 {
    fn from(word: LinkWord) -> Self {
        word.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_packing() {
        let word = LinkWord::from_bytes([0x12, 0x34, 0x56, 0x78]);
        assert_eq!(word.raw(), 0x1234_5678);
        assert_eq!(word.to_bytes(), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_sentinel() {
        assert!(SENTINEL.is_sentinel());
        assert!(LinkWord(0xDEAD_B00F).is_sentinel());
        assert!(!LinkWord(0xDEAD_B00E).is_sentinel());
        assert_eq!(SENTINEL.to_bytes(), [0xDE, 0xAD, 0xB0, 0x0F]);
    }

    #[test]
    fn test_wire_bit_order() {
        let word = LinkWord(0x8000_0001);
        assert!(word.wire_bit(0));
        assert!(!word.wire_bit(1));
        assert!(!word.wire_bit(30));
        assert!(word.wire_bit(31));
    }
}
