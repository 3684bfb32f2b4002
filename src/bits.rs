//! Tri-state bit values and small bit manipulation helpers.
//!
//! Bits are numbered LSB-first: bit `offset + 0` carries weight `1 << 0` of a
//! window starting at `offset`.

/// Character used for a bit in the [TriState::Unknown] state.
pub const DONT_CARE: char = 'x';

/// A single bit of simulated memory: known zero, known one, or don't-care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    Zero,
    One,
    /// Uninitialised or don't-care.
    #[default]
    Unknown,
}

impl TriState {
    /// Parses a bit character: `'0'`, `'1'`, anything else is [TriState::Unknown].
    pub fn from_char(c: char) -> Self {
        match c {
            '0' => TriState::Zero,
            '1' => TriState::One,
            _ => TriState::Unknown,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            TriState::Zero => '0',
            TriState::One => '1',
            TriState::Unknown => DONT_CARE,
        }
    }

    /// Returns the boolean value, or `None` for [TriState::Unknown].
    pub fn known(self) -> Option<bool> {
        match self {
            TriState::Zero => Some(false),
            TriState::One => Some(true),
            TriState::Unknown => None,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { TriState::One } else { TriState::Zero }
    }
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: usize) -> i64 {
    debug_assert!((1..=64).contains(&bits));
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}
