use thiserror::Error;

/// Error type for encoding, decoding and validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Byte length or symbol count is not a multiple of `multiple`.
    #[error("invalid length {len}: must be a multiple of {multiple}")]
    InvalidLength { len: usize, multiple: usize },

    /// Padding digit missing (`None`), not in `0..=4`, or larger than the data.
    #[error("invalid padding digit: {}", display_padding(.0))]
    InvalidPadding(Option<char>),

    /// A character outside the alphabet; `position` is a byte offset into the input.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// Bits that should hold zero padding do not.
    #[error("padding of {padding} byte(s) is not backed by zero bits")]
    InvalidPaddingBits { padding: u8 },

    /// Separator where a symbol belongs, or a symbol where a separator belongs.
    #[error("separator out of place at position {position}")]
    MisplacedSeparator { position: usize },

    #[error("output buffer too small: need {needed} bytes, got {actual}")]
    OutputBufferTooSmall { needed: usize, actual: usize },
}

fn display_padding(c: &Option<char>) -> String {
    match c {
        Some(c) => format!("{c:?}"),
        None => "missing".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
