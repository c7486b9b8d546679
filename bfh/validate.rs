//! Format checks that run without producing any bytes.
//!
//! The `is_*` predicates never fail; the `check_*` functions report why a
//! string was rejected and return its padding digit otherwise.

use tracing::debug;

use crate::alphabet::{value_of, PADDING_TAILS, SEPARATOR_BYTE};
use crate::{parse_normal, Error, Result, ALPHABET, GROUP_WIDTH, SEPARATOR};

/// Returns true if `input` has exactly the layout `encode` produces and
/// its padding bits are zero.
///
/// ```
/// assert!(bfh::is_well_formatted("0-"));
/// assert!(bfh::is_well_formatted("1-zzzz-zzr0"));
/// assert!(!bfh::is_well_formatted("1-zzzz-zzr0-"));
/// assert!(!bfh::is_well_formatted("1-zzz-zzzr0"));
/// ```
pub fn is_well_formatted(input: &str) -> bool {
    check_well_formatted(input).is_ok()
}

/// Returns true if `input` decodes and its padding bits are zero.
/// Separators may appear anywhere.
///
/// ```
/// assert!(bfh::is_acceptable("0"));
/// assert!(bfh::is_acceptable("4-zwg-ae0-7x2-400-00-00"));
/// assert!(!bfh::is_acceptable("1-zwga-e07x-2400-00z0"));
/// ```
pub fn is_acceptable(input: &str) -> bool {
    check_acceptable(input).is_ok()
}

/// Returns true if `input` is made of blocks of exactly 4 symbols joined by
/// single separators. The empty string is strict.
///
/// ```
/// assert!(bfh::is_strict(""));
/// assert!(bfh::is_strict("zw00-0000"));
/// assert!(!bfh::is_strict("zw00-0000-"));
/// assert!(!bfh::is_strict("zw000000"));
/// ```
pub fn is_strict(input: &str) -> bool {
    input.is_empty()
        || input.split(SEPARATOR).all(|block| {
            block.len() == GROUP_WIDTH && block.bytes().all(|b| value_of(b).is_some())
        })
}

/// Checks everything [`is_acceptable`] does and returns the padding digit.
pub fn check_acceptable(input: &str) -> Result<u8> {
    let (padding, values) = parse_normal(input)?;
    check_padding_bits(padding, &values)?;
    Ok(padding)
}

/// Checks everything [`is_well_formatted`] does and returns the padding digit.
pub fn check_well_formatted(input: &str) -> Result<u8> {
    let padding = check_acceptable(input)?;
    // Only the padding digit, symbols and separators are left at this point,
    // so byte offsets and character offsets agree.
    check_layout(input.as_bytes())?;
    Ok(padding)
}

/// Checks the separator cadence: `d-xxxx-xxxx-...-xxxx`, or `d-` alone.
fn check_layout(bytes: &[u8]) -> Result<()> {
    if bytes.first() == Some(&SEPARATOR_BYTE) {
        return Err(misplaced(0));
    }
    if bytes.get(1) != Some(&SEPARATOR_BYTE) {
        return Err(misplaced(1));
    }

    let body = &bytes[2..];
    for (i, &b) in body.iter().enumerate() {
        let separator_expected = (i + 1) % (GROUP_WIDTH + 1) == 0;
        if (b == SEPARATOR_BYTE) != separator_expected {
            return Err(misplaced(i + 2));
        }
    }

    if body.last() == Some(&SEPARATOR_BYTE) {
        return Err(misplaced(bytes.len() - 1));
    }

    Ok(())
}

fn misplaced(position: usize) -> Error {
    debug!(position, "separator out of place");
    Error::MisplacedSeparator { position }
}

/// Checks that the symbols standing for appended zero bytes are zero, and
/// that the symbol straddling the data/padding boundary has its low bits clear.
fn check_padding_bits(padding: u8, values: &[u8]) -> Result<()> {
    let Some(tail) = PADDING_TAILS[padding as usize] else {
        return Ok(());
    };

    let ok = values
        .len()
        .checked_sub(tail.zero_symbols + 1)
        .is_some_and(|boundary| {
            let boundary_symbol = ALPHABET[values[boundary] as usize];
            tail.boundary.contains(&boundary_symbol)
                && values[boundary + 1..].iter().all(|&v| v == 0)
        });

    if !ok {
        debug!(padding, "padding bits are not zero");
        return Err(Error::InvalidPaddingBits { padding });
    }
    Ok(())
}
