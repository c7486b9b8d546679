//! A human-typeable binary-to-text codec.
//!
//! Data is packed 5 bits per symbol over a 32-symbol alphabet of digits and
//! lowercase letters (no `i`, `l`, `o` or `u`), and the symbols are grouped
//! in blocks of four separated by dashes.
//!
//! Two forms exist:
//!
//! * **normal**: a padding digit `0..=4` comes first, telling how many zero
//!   bytes were appended to reach a multiple of 5 bytes. `encode(&[0x7e])`
//!   is `"4-fr00-0000"`. The empty input encodes to `"0-"`.
//! * **strict**: no padding digit, only for data whose length is already a
//!   multiple of 5. The empty input encodes to `""`.
//!
//! Decoding ignores where separators are. [`is_well_formatted`] checks the
//! exact layout `encode` produces, [`is_acceptable`] checks that a string
//! decodes and that its padding bits are zero, and [`is_strict`] checks the
//! strict layout.
//!
//! # Example
//!
//! ```
//! let encoded = bfh::encode(&[0xff, 0xff, 0xff, 0xff]);
//! assert_eq!(encoded, "1-zzzz-zzr0");
//! assert!(bfh::is_well_formatted(&encoded));
//! assert_eq!(bfh::decode(&encoded).unwrap(), [0xff, 0xff, 0xff, 0xff]);
//! ```

use tracing::debug;

mod alphabet;
mod error;
mod validate;

#[cfg(test)]
#[path = "bfh_tests.rs"]
mod tests;

pub use alphabet::{ALPHABET, GROUP_WIDTH, MAX_PADDING, SEPARATOR};
pub use error::{Error, Result};
pub use validate::{
    check_acceptable, check_well_formatted, is_acceptable, is_strict, is_well_formatted,
};

use alphabet::{padding_of, value_of, SEPARATOR_BYTE};

/// Bytes packed into one run of 8 symbols.
const GROUP_BYTES: usize = 5;

/// Symbols produced by one run of 5 bytes.
const GROUP_SYMBOLS: usize = 8;

/// Which of the two encoded forms to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Leading padding digit, any input length.
    #[default]
    Normal,
    /// No padding digit, input length must be a multiple of 5.
    Strict,
}

/// Number of zero bytes `encode` appends to data of length `len`.
///
/// ```
/// assert_eq!(bfh::padding_for(0), 0);
/// assert_eq!(bfh::padding_for(1), 4);
/// assert_eq!(bfh::padding_for(4), 1);
/// assert_eq!(bfh::padding_for(10), 0);
/// ```
#[inline]
pub fn padding_for(len: usize) -> u8 {
    ((GROUP_BYTES - len % GROUP_BYTES) % GROUP_BYTES) as u8
}

/// Calculates the exact encoded length, separators included.
///
/// For [`Format::Strict`] the length is expected to be a multiple of 5.
///
/// ```
/// use bfh::{encoded_len, Format};
///
/// assert_eq!(encoded_len(0, Format::Normal), 2);
/// assert_eq!(encoded_len(1, Format::Normal), 11);
/// assert_eq!(encoded_len(5, Format::Strict), 9);
/// ```
pub fn encoded_len(len: usize, format: Format) -> usize {
    let groups = len.div_ceil(GROUP_BYTES);
    // Each group is "xxxx-xxxx" and groups are joined by one separator.
    let body = if groups == 0 { 0 } else { groups * (GROUP_SYMBOLS + 2) - 1 };

    match format {
        Format::Normal => 2 + body,
        Format::Strict => body,
    }
}

/// Encodes data into a pre-allocated output buffer.
///
/// Returns the number of bytes written.
///
/// ```
/// use bfh::{encode_into, Format};
///
/// let mut output = [0u8; 16];
/// let written = encode_into(&mut output, &[0x7e], Format::Normal).unwrap();
/// assert_eq!(&output[..written], b"4-fr00-0000");
/// ```
pub fn encode_into(output: &mut [u8], data: &[u8], format: Format) -> Result<usize> {
    if format == Format::Strict {
        check_strict_len(data.len())?;
    }

    let needed = encoded_len(data.len(), format);
    if output.len() < needed {
        debug!(needed, actual = output.len(), "output buffer too small");
        return Err(Error::OutputBufferTooSmall {
            needed,
            actual: output.len(),
        });
    }

    encode_into_unchecked(&mut output[..needed], data, format);
    Ok(needed)
}

/// Encodes data into the normal form, padding digit first.
///
/// ```
/// assert_eq!(bfh::encode(&[]), "0-");
/// assert_eq!(bfh::encode(&[0xff; 5]), "0-zzzz-zzzz");
/// ```
pub fn encode(data: &[u8]) -> String {
    let mut output = vec![0u8; encoded_len(data.len(), Format::Normal)];
    encode_into_unchecked(&mut output, data, Format::Normal);
    into_string(output)
}

/// Encodes data into the strict form. Fails unless the length is a multiple of 5.
///
/// ```
/// assert_eq!(bfh::encode_strict(&[0; 5]).unwrap(), "0000-0000");
/// assert!(bfh::encode_strict(&[0; 4]).is_err());
/// ```
pub fn encode_strict(data: &[u8]) -> Result<String> {
    check_strict_len(data.len())?;

    let mut output = vec![0u8; encoded_len(data.len(), Format::Strict)];
    encode_into_unchecked(&mut output, data, Format::Strict);
    Ok(into_string(output))
}

fn check_strict_len(len: usize) -> Result<()> {
    if !len.is_multiple_of(GROUP_BYTES) {
        debug!(len, "strict encoding needs a multiple of 5 bytes");
        return Err(Error::InvalidLength {
            len,
            multiple: GROUP_BYTES,
        });
    }
    Ok(())
}

fn into_string(output: Vec<u8>) -> String {
    // Output holds alphabet symbols, digits and separators only.
    String::from_utf8(output).expect("bfh output is always ASCII")
}

/// Writes the encoded form into `output`, which must be exactly
/// `encoded_len(data.len(), format)` bytes long.
fn encode_into_unchecked(output: &mut [u8], data: &[u8], format: Format) {
    let mut out_idx = 0;

    if format == Format::Normal {
        output[0] = b'0' + padding_for(data.len());
        output[1] = SEPARATOR_BYTE;
        out_idx = 2;
    }

    let chunks = data.chunks_exact(GROUP_BYTES);
    let remainder = chunks.remainder();

    // The last partial group is zero-filled, which is the padding.
    let mut tail_buf = [0u8; GROUP_BYTES];
    tail_buf[..remainder.len()].copy_from_slice(remainder);
    let tail = (!remainder.is_empty()).then_some(&tail_buf[..]);

    for (i, group) in chunks.chain(tail).enumerate() {
        if i > 0 {
            output[out_idx] = SEPARATOR_BYTE;
            out_idx += 1;
        }
        pack_group(&mut output[out_idx..out_idx + GROUP_SYMBOLS + 1], group);
        out_idx += GROUP_SYMBOLS + 1;
    }
}

/// Packs 5 bytes into `"xxxx-xxxx"`, most significant bit first.
#[inline]
fn pack_group(output: &mut [u8], group: &[u8]) {
    let (b0, b1, b2, b3, b4) = (group[0], group[1], group[2], group[3], group[4]);

    let values = [
        b0 >> 3,
        ((b0 & 0x07) << 2) | (b1 >> 6),
        (b1 >> 1) & 0x1f,
        ((b1 & 0x01) << 4) | (b2 >> 4),
        ((b2 & 0x0f) << 1) | (b3 >> 7),
        (b3 >> 2) & 0x1f,
        ((b3 & 0x03) << 3) | (b4 >> 5),
        b4 & 0x1f,
    ];

    for (i, v) in values[..GROUP_WIDTH].iter().enumerate() {
        output[i] = ALPHABET[*v as usize];
    }
    output[GROUP_WIDTH] = SEPARATOR_BYTE;
    for (i, v) in values[GROUP_WIDTH..].iter().enumerate() {
        output[GROUP_WIDTH + 1 + i] = ALPHABET[*v as usize];
    }
}

/// Decodes a normal-form string. Separators may appear anywhere.
///
/// Trailing padding bits are not inspected here; use [`is_acceptable`] for that.
///
/// ```
/// assert_eq!(bfh::decode("4-fr00-0000").unwrap(), [0x7e]);
/// assert_eq!(bfh::decode("4-fr0-00-000").unwrap(), [0x7e]);
/// assert!(bfh::decode("4-ouga-e07x-2400-0000").is_err());
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let (padding, values) = parse_normal(input)?;

    let mut bytes = unpack(&values);
    bytes.truncate(bytes.len() - padding as usize);
    Ok(bytes)
}

/// Decodes a strict-form string. Separators may appear anywhere; the number
/// of symbols must be a multiple of 4.
///
/// ```
/// assert_eq!(bfh::decode_strict("zw00-0000").unwrap(), [0xff, 0, 0, 0, 0]);
/// assert_eq!(bfh::decode_strict("").unwrap(), Vec::<u8>::new());
/// ```
pub fn decode_strict(input: &str) -> Result<Vec<u8>> {
    let values = symbol_values(symbols(input), input.len())?;

    if !values.len().is_multiple_of(GROUP_WIDTH) {
        debug!(len = values.len(), "strict input is not made of whole blocks");
        return Err(Error::InvalidLength {
            len: values.len(),
            multiple: GROUP_WIDTH,
        });
    }

    Ok(unpack(&values))
}

/// Characters of `input` other than separators, with their byte offsets.
fn symbols(input: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    input.char_indices().filter(|&(_, c)| c != SEPARATOR)
}

/// Splits a normal-form string into its padding digit and symbol values,
/// checking the alphabet, the symbol count and the padding range.
pub(crate) fn parse_normal(input: &str) -> Result<(u8, Vec<u8>)> {
    let mut chars = symbols(input);

    let (digit, padding) = match chars.next() {
        Some((_, c)) => match padding_of(c) {
            Some(padding) => (c, padding),
            None => {
                debug!(digit = %c, "padding digit out of range");
                return Err(Error::InvalidPadding(Some(c)));
            }
        },
        None => {
            debug!("padding digit missing");
            return Err(Error::InvalidPadding(None));
        }
    };

    let values = symbol_values(chars, input.len())?;

    if !values.len().is_multiple_of(GROUP_SYMBOLS) {
        debug!(len = values.len(), "symbol count is not a multiple of 8");
        return Err(Error::InvalidLength {
            len: values.len(),
            multiple: GROUP_SYMBOLS,
        });
    }

    if padding > 0 && values.is_empty() {
        debug!(padding, "padding digit without data");
        return Err(Error::InvalidPadding(Some(digit)));
    }

    Ok((padding, values))
}

/// Maps symbols to their 5-bit values, failing on the first one outside the alphabet.
fn symbol_values(
    chars: impl Iterator<Item = (usize, char)>,
    capacity: usize,
) -> Result<Vec<u8>> {
    let mut values = Vec::with_capacity(capacity);

    for (position, character) in chars {
        match u8::try_from(character).ok().and_then(value_of) {
            Some(v) => values.push(v),
            None => {
                debug!(position, character = %character, "character outside the alphabet");
                return Err(Error::InvalidCharacter {
                    character,
                    position,
                });
            }
        }
    }

    Ok(values)
}

/// Unpacks 5-bit values into bytes. Bits past the last whole byte are dropped.
fn unpack(values: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(values.len() * 5 / 8);

    let groups = values.chunks_exact(GROUP_SYMBOLS);
    let remainder = groups.remainder();

    for g in groups {
        result.extend_from_slice(&[
            (g[0] << 3) | (g[1] >> 2),
            (g[1] << 6) | (g[2] << 1) | (g[3] >> 4),
            (g[3] << 4) | (g[4] >> 1),
            (g[4] << 7) | (g[5] << 2) | (g[6] >> 3),
            (g[6] << 5) | g[7],
        ]);
    }

    unpack_partial(remainder, &mut result);
    result
}

/// Unpacks fewer than 8 values one symbol at a time, OR-ing each symbol's
/// bits into the byte it starts in and, if it straddles, the next one.
fn unpack_partial(values: &[u8], result: &mut Vec<u8>) {
    let start = result.len();
    result.resize(start + values.len() * 5 / 8, 0);
    let out = &mut result[start..];

    for (i, &v) in values.iter().enumerate() {
        let bit_offset = i * 5;
        let index = bit_offset / 8;
        let shift = bit_offset % 8;

        let Some(current) = out.get_mut(index) else {
            break;
        };

        if shift < 4 {
            *current |= v << (3 - shift);
        } else {
            *current |= v >> (shift - 3);
            if let Some(next) = out.get_mut(index + 1) {
                *next |= v << (11 - shift);
            }
        }
    }
}
