//! Bit storage backends.
//!
//! The layout engine never owns the meaning of the bits it addresses; it only
//! issues single-bit reads and writes through [BitStore]. A write must be
//! visible to a subsequent read of the same bit, nothing more is assumed.

use crate::bits::TriState;

/// Tri-state bit storage addressed by absolute bit index.
pub trait BitStore {
    /// Number of addressable bits.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self, bit_index: usize) -> TriState;

    fn write(&mut self, bit_index: usize, value: TriState);
}

/// The "no storage" binding: every read is [TriState::Unknown], writes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl BitStore for NoStore {
    fn len(&self) -> usize {
        usize::MAX
    }

    fn read(&self, _bit_index: usize) -> TriState {
        TriState::Unknown
    }

    fn write(&mut self, _bit_index: usize, _value: TriState) {}
}

/// In-memory tri-state storage, one [TriState] per bit, initialised to unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriStateBuffer {
    bits: Vec<TriState>,
}

impl TriStateBuffer {
    pub fn new(len_bits: usize) -> Self {
        TriStateBuffer {
            bits: vec![TriState::Unknown; len_bits],
        }
    }

    pub fn as_slice(&self) -> &[TriState] {
        &self.bits
    }
}

impl BitStore for TriStateBuffer {
    fn len(&self) -> usize {
        self.bits.len()
    }

    fn read(&self, bit_index: usize) -> TriState {
        self.bits[bit_index]
    }

    fn write(&mut self, bit_index: usize, value: TriState) {
        self.bits[bit_index] = value;
    }
}

/// Two-state storage over bytes, LSB-first within each byte.
///
/// Has no don't-care state: writing [TriState::Unknown] stores a zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteStore {
    data: Vec<u8>,
}

impl ByteStore {
    /// Zeroed storage large enough for `len_bits` bits.
    pub fn new(len_bits: usize) -> Self {
        ByteStore {
            data: vec![0u8; len_bits.div_ceil(8)],
        }
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        ByteStore { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl BitStore for ByteStore {
    fn len(&self) -> usize {
        self.data.len() * 8
    }

    fn read(&self, bit_index: usize) -> TriState {
        let byte = self.data[bit_index / 8];
        TriState::from((byte >> (bit_index % 8)) & 1 == 1)
    }

    fn write(&mut self, bit_index: usize, value: TriState) {
        let mask = 1u8 << (bit_index % 8);
        let byte = &mut self.data[bit_index / 8];
        match value {
            TriState::One => *byte |= mask,
            TriState::Zero | TriState::Unknown => *byte &= !mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_store_reads_unknown() {
        let mut store = NoStore;
        store.write(3, TriState::One);
        assert_eq!(store.read(3), TriState::Unknown);
    }

    #[test]
    fn test_tri_state_buffer_starts_unknown() {
        let store = TriStateBuffer::new(4);
        assert_eq!(store.len(), 4);
        assert!(store.as_slice().iter().all(|b| *b == TriState::Unknown));
    }

    #[test]
    fn test_tri_state_buffer_write_read() {
        let mut store = TriStateBuffer::new(4);
        store.write(2, TriState::One);
        store.write(3, TriState::Zero);
        assert_eq!(store.read(2), TriState::One);
        assert_eq!(store.read(3), TriState::Zero);
        assert_eq!(store.read(0), TriState::Unknown);
    }

    #[test]
    fn test_byte_store_lsb_first() {
        let mut store = ByteStore::new(12);
        assert_eq!(store.len(), 16);

        store.write(0, TriState::One);
        store.write(9, TriState::One);
        assert_eq!(store.as_bytes(), &[0b0000_0001, 0b0000_0010]);

        store.write(0, TriState::Unknown);
        assert_eq!(store.read(0), TriState::Zero);
        assert_eq!(store.read(9), TriState::One);
    }
}
