//! Symbol tables shared by the packer, the unpacker and the validators.
//!
//! Everything here is built at compile time; there is no lazy state.

/// The 32 symbols, in value order: digits, then lowercase letters without
/// `i`, `l`, `o` and `u`.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

/// Separator placed between groups of symbols.
pub const SEPARATOR: char = '-';

pub(crate) const SEPARATOR_BYTE: u8 = SEPARATOR as u8;

/// Number of symbols between two separators.
pub const GROUP_WIDTH: usize = 4;

/// Largest padding digit `encode` can emit.
pub const MAX_PADDING: u8 = 4;

/// Marker for bytes that are not part of the alphabet.
pub(crate) const INVALID: u8 = 0xff;

/// Pre-computed decode table indexed by the ASCII code of a symbol.
pub(crate) static DECODE_TABLE: [u8; 256] = build_decode_table(ALPHABET);

/// Builds a decode lookup table for the given alphabet at compile time.
/// Lookups are case-sensitive: uppercase letters are rejected.
const fn build_decode_table(alphabet: &[u8; 32]) -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 32 {
        table[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the 5-bit value of `byte`, or `None` if it is not a symbol.
#[inline]
pub(crate) fn value_of(byte: u8) -> Option<u8> {
    match DECODE_TABLE[byte as usize] {
        INVALID => None,
        v => Some(v),
    }
}

/// How the last symbols of a padded encoding must look.
///
/// Padding always appends whole zero bytes, but a symbol holds 5 bits, so
/// `zero_symbols` symbols are entirely padding and the one before them
/// straddles the boundary: only its high bits carry data and its value must
/// be one of `boundary`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PaddingTail {
    pub zero_symbols: usize,
    pub boundary: &'static [u8],
}

/// Boundary symbols with their 3 low bits clear.
const PAD_1_BOUNDARY: &[u8; 4] = b"08gr";
/// Boundary symbols with their low bit clear.
const PAD_2_BOUNDARY: &[u8; 16] = b"02468acegjmprtwy";
/// Boundary symbols with their 4 low bits clear.
const PAD_3_BOUNDARY: &[u8; 2] = b"0g";
/// Boundary symbols with their 2 low bits clear.
const PAD_4_BOUNDARY: &[u8; 8] = b"048cgmrw";

/// Tail rules indexed by padding digit. Index 0 has no padding to check.
pub(crate) static PADDING_TAILS: [Option<PaddingTail>; 5] = [
    None,
    Some(PaddingTail {
        zero_symbols: 1,
        boundary: PAD_1_BOUNDARY,
    }),
    Some(PaddingTail {
        zero_symbols: 3,
        boundary: PAD_2_BOUNDARY,
    }),
    Some(PaddingTail {
        zero_symbols: 4,
        boundary: PAD_3_BOUNDARY,
    }),
    Some(PaddingTail {
        zero_symbols: 6,
        boundary: PAD_4_BOUNDARY,
    }),
];

/// Parses a padding digit, `'0'..='4'`.
#[inline]
pub(crate) fn padding_of(c: char) -> Option<u8> {
    c.to_digit(10)
        .map(|d| d as u8)
        .filter(|&d| d <= MAX_PADDING)
}
