//! Conversion between a window of tri-state bits and integers or bit strings.
//!
//! A [BitWindow] is the `[offset, offset + width)` range of a field. Storage is
//! LSB-first: bit `offset + i` carries weight `1 << i`. Bit strings produced by
//! [BitWindow::as_bit_string] are printed MSB-first, while
//! [BitWindow::from_bit_string] maps character `i` to bit `offset + i`.

use crate::{
    bits::{TriState, sign_extend},
    store::BitStore,
};

/// Width of the integer type the codec decodes into.
pub const INTEGER_BITS: usize = u64::BITS as usize;

/// A contiguous range of bits in a [BitStore].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitWindow {
    pub offset: usize,
    pub width: usize,
}

impl BitWindow {
    pub fn new(offset: usize, width: usize) -> Self {
        BitWindow { offset, width }
    }

    /// One exclusive past the last bit of the window.
    pub fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Renders one character per bit, most significant bit first.
    pub fn as_bit_string<S: BitStore + ?Sized>(&self, store: &S) -> String {
        (0..self.width)
            .rev()
            .map(|i| store.read(self.offset + i).to_char())
            .collect()
    }

    /// Decodes the window as an unsigned integer.
    ///
    /// Returns `None` if any bit is unknown, or if a set bit lies beyond
    /// [INTEGER_BITS]. The two cases are not distinguished.
    pub fn as_integer<S: BitStore + ?Sized>(&self, store: &S) -> Option<u64> {
        let mut value = 0u64;

        for i in 0..self.width {
            match store.read(self.offset + i) {
                TriState::Unknown => return None,
                TriState::Zero => {}
                TriState::One => {
                    if i >= INTEGER_BITS {
                        return None;
                    }
                    value |= 1u64 << i;
                }
            }
        }

        Some(value)
    }

    /// Decodes the window as a two's-complement integer. Windows wider than
    /// [INTEGER_BITS] or empty windows yield `None`.
    pub fn as_signed<S: BitStore + ?Sized>(&self, store: &S) -> Option<i64> {
        if self.width == 0 || self.width > INTEGER_BITS {
            return None;
        }

        self.as_integer(store)
            .map(|value| sign_extend(value, self.width))
    }

    /// Writes the low bits of `value` into the window. Bits past
    /// [INTEGER_BITS] are left untouched.
    pub fn from_integer<S: BitStore + ?Sized>(&self, store: &mut S, value: u64) {
        for i in 0..self.width.min(INTEGER_BITS) {
            store.write(self.offset + i, TriState::from((value >> i) & 1 == 1));
        }
    }

    /// Writes character `i` of `bits` to bit `offset + i`.
    ///
    /// `'0'` and `'1'` are known bits, any other character is don't-care.
    /// Characters past the window are ignored and bits past the end of a short
    /// string are left untouched.
    pub fn from_bit_string<S: BitStore + ?Sized>(&self, store: &mut S, bits: &str) {
        for (i, c) in bits.chars().take(self.width).enumerate() {
            store.write(self.offset + i, TriState::from_char(c));
        }
    }

    /// Resets every bit in the window to [TriState::Unknown].
    pub fn clear<S: BitStore + ?Sized>(&self, store: &mut S) {
        for i in 0..self.width {
            store.write(self.offset + i, TriState::Unknown);
        }
    }
}
