use alloy::primitives::{Address, B256, U256};

/// A read cursor over a single 256-bit word.
///
/// Fields are popped from the low bits upwards. The backing word is never modified; only the bit
/// offset advances, so a reader can be cloned to peek without disturbing the original.
///
/// ```
/// use alloy::primitives::U256;
/// use dex2_decoder::BitFieldReader;
///
/// let mut reader = BitFieldReader::new(U256::from(0x07de01u64));
/// assert_eq!(reader.pop_u16(), 0xde01);
/// assert_eq!(reader.pop_u8(), 7);
/// assert!(reader.remainder_is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFieldReader {
    word: U256,
    offset: usize,
}

impl BitFieldReader {
    /// Start reading `word` at bit 0.
    pub fn new(word: U256) -> Self {
        Self { word, offset: 0 }
    }

    /// Bits consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Pop the low `bits` bits. Reading past bit 255 yields zeros.
    fn pop_bits(&mut self, bits: usize) -> U256 {
        let field = self.remainder() & low_mask(bits);
        self.offset = (self.offset + bits).min(U256::BITS);
        field
    }

    /// Pop an 8-bit field.
    pub fn pop_u8(&mut self) -> u8 {
        self.pop_bits(8).as_limbs()[0] as u8
    }

    /// Pop a 16-bit field.
    pub fn pop_u16(&mut self) -> u16 {
        self.pop_bits(16).as_limbs()[0] as u16
    }

    /// Pop a 32-bit field.
    pub fn pop_u32(&mut self) -> u32 {
        self.pop_bits(32).as_limbs()[0] as u32
    }

    /// Pop a 64-bit field.
    pub fn pop_u64(&mut self) -> u64 {
        self.pop_bits(64).as_limbs()[0]
    }

    /// Pop a 160-bit field as an address.
    pub fn pop_u160(&mut self) -> Address {
        Address::from_word(B256::from(self.pop_bits(160)))
    }

    /// Everything not consumed yet, shifted down to bit 0.
    pub fn remainder(&self) -> U256 {
        if self.offset >= U256::BITS {
            U256::ZERO
        } else {
            self.word >> self.offset
        }
    }

    /// True iff no set bits remain above the cursor.
    pub fn remainder_is_zero(&self) -> bool {
        self.remainder().is_zero()
    }
}

fn low_mask(bits: usize) -> U256 {
    if bits >= U256::BITS {
        U256::MAX
    } else {
        (U256::from(1u8) << bits) - U256::from(1u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_fields_low_bits_first() {
        // <u64 0x1122334455667788> <u32 0xaabbccdd> <u16 0xde02> <u8 0x1b>
        let word = (U256::from(0x1122334455667788u64) << 56) |
            (U256::from(0xaabbccddu64) << 24) |
            (U256::from(0xde02u64) << 8) |
            U256::from(0x1bu64);
        let mut reader = BitFieldReader::new(word);

        assert_eq!(reader.pop_u8(), 0x1b);
        assert_eq!(reader.pop_u16(), 0xde02);
        assert_eq!(reader.pop_u32(), 0xaabbccdd);
        assert_eq!(reader.pop_u64(), 0x1122334455667788);
        assert_eq!(reader.offset(), 120);
        assert!(reader.remainder_is_zero());
    }

    #[test]
    fn test_pop_u160_masks_address() {
        let address = Address::repeat_byte(0xab);
        let word = (U256::from(0x42u64) << 160) | U256::from_be_slice(address.as_slice());
        let mut reader = BitFieldReader::new(word);

        assert_eq!(reader.pop_u160(), address);
        assert_eq!(reader.remainder(), U256::from(0x42u64));
        assert_eq!(reader.pop_u8(), 0x42);
        assert!(reader.remainder_is_zero());
    }

    #[test]
    fn test_remainder_detects_extra_bits() {
        let mut reader = BitFieldReader::new(U256::from(1u8) << 255);
        reader.pop_u64();
        reader.pop_u64();
        assert!(!reader.remainder_is_zero());
        assert_eq!(reader.remainder(), U256::from(1u8) << 127);
    }

    #[test]
    fn test_reading_past_the_end_yields_zero() {
        let mut reader = BitFieldReader::new(U256::MAX);
        reader.pop_u160();
        reader.pop_u64();
        assert_eq!(reader.pop_u32(), u32::MAX);
        assert_eq!(reader.offset(), 256);
        assert_eq!(reader.pop_u8(), 0);
        assert!(reader.remainder_is_zero());
    }

    #[test]
    fn test_source_word_is_untouched() {
        let word = U256::from(0xde01u64);
        let mut reader = BitFieldReader::new(word);
        let snapshot = reader;
        reader.pop_u16();

        assert_eq!(snapshot.remainder(), word);
        assert_eq!(word, U256::from(0xde01u64));
    }
}
