/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of base32k.
 *
 * base32k is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * base32k is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with base32k. If not, see <https://www.gnu.org/licenses/>.
 */

//! Functions and types for decoding base32k text.

use super::{BITS_PER_GROUP, BITS_PER_WORD};

use core::fmt::{self, Display, Formatter};

#[cfg(feature = "alloc")]
use super::alphabet::{self, Group, TailBits};
#[cfg(feature = "alloc")]
use super::bits::BitWriter;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An error encountered while decoding base32k text.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Encountered a code point outside the data ranges, or a final
    /// character that is not a terminator.
    InvalidEncoding(u32),
    /// The input was empty, so no terminator was present.
    MissingTerminator,
    /// The terminator does not describe a whole number of words. Only
    /// checked when [`DecodeConfig::strict`] is true.
    BadLength,
    /// The padding bits of the last data character were not zero. Only
    /// checked when [`DecodeConfig::strict`] is true.
    NonZeroPadding,
}

use DecodeError as Error;

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl DecodeError {
    /// The offending code point, if one caused the error.
    pub fn codepoint(&self) -> Option<u32> {
        match self {
            Self::InvalidEncoding(c) => Some(*c),
            _ => None,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidEncoding(c) => {
                write!(f, "invalid encoding U+{:04X}", c)
            }
            Self::MissingTerminator => write!(f, "missing terminator"),
            Self::BadLength => write!(f, "bad input length"),
            Self::NonZeroPadding => write!(f, "non-zero padding bits"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// Used by the `decode_*_with` functions to configure the decoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct DecodeConfig {
    /// If true, decoding stops at the first terminator and anything after it
    /// is ignored, rather than being treated as an invalid data character.
    /// [default: false]
    pub relaxed: bool,
    /// If true, input that no encoder would produce is rejected: the data
    /// must be a whole number of words and its padding bits must be zero.
    /// [default: false]
    pub strict: bool,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            relaxed: false,
            strict: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An upper bound on the number of words decoded from `char_count`
/// characters, terminator included.
pub fn decoded_len_hint(char_count: usize) -> usize {
    let bits = char_count
        .saturating_sub(1)
        .saturating_mul(BITS_PER_GROUP as usize);
    bits / BITS_PER_WORD as usize + 1
}

#[cfg(feature = "alloc")]
fn check_canonical(
    written: u64,
    last: Option<Group>,
    tail: TailBits,
) -> DecodeResult<()> {
    let bits = written
        .checked_sub(tail.padding().into())
        .ok_or(Error::BadLength)?;
    if bits % u64::from(BITS_PER_WORD) != 0 {
        return Err(Error::BadLength);
    }
    let mask = (1_u16 << tail.padding()) - 1;
    match last {
        Some(g) if g.get() & mask != 0 => Err(Error::NonZeroPadding),
        _ => Ok(()),
    }
}

#[cfg(feature = "alloc")]
fn decode_codepoints<I>(
    iter: I,
    config: DecodeConfig,
) -> DecodeResult<Vec<u32>>
where
    I: Iterator<Item = u32>,
{
    let mut iter = iter.peekable();
    let mut writer =
        BitWriter::with_capacity(decoded_len_hint(iter.size_hint().0));
    let mut last = None;

    let tail = loop {
        let c = iter.next().ok_or(Error::MissingTerminator)?;
        let is_last = iter.peek().is_none();
        if is_last || config.relaxed {
            if let Some(tail) = alphabet::from_terminator(c) {
                break tail;
            }
            if is_last {
                return Err(Error::InvalidEncoding(c));
            }
        }
        let g = alphabet::from_char(c).ok_or(Error::InvalidEncoding(c))?;
        writer.write_group(g);
        last = Some(g);
    };

    if config.strict {
        check_canonical(writer.position(), last, tail)?;
    }

    let mut words = writer.into_words();
    if !tail.is_full() {
        // The last word holds only bits read past the end of the input.
        words.pop();
    }
    Ok(words)
}

#[cfg(feature = "alloc")]
fn logged<T>(result: DecodeResult<Vec<T>>) -> DecodeResult<Vec<T>> {
    match &result {
        Ok(words) => log::trace!("decoded {} words", words.len()),
        Err(e) => log::debug!("rejected base32k input: {}", e),
    }
    result
}

/// Decodes a sequence of base32k chars.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_chars<I>(chars: I) -> DecodeResult<Vec<u32>>
where
    I: IntoIterator<Item = char>,
{
    decode_chars_with(chars, DecodeConfig::new())
}

/// Decodes base32k UTF-16 code units. Unpaired surrogates are reported as
/// [`DecodeError::InvalidEncoding`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_utf16<I>(units: I) -> DecodeResult<Vec<u32>>
where
    I: IntoIterator<Item = u16>,
{
    decode_utf16_with(units, DecodeConfig::new())
}

/// Decodes a base32k `str`.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_str(s: &str) -> DecodeResult<Vec<u32>> {
    decode_str_with(s, DecodeConfig::new())
}

/// Decodes a sequence of base32k chars with the given config.
///
/// This function is like [`decode_chars`], but takes a configuration object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_chars_with<I>(
    chars: I,
    config: DecodeConfig,
) -> DecodeResult<Vec<u32>>
where
    I: IntoIterator<Item = char>,
{
    logged(decode_codepoints(chars.into_iter().map(u32::from), config))
}

/// Decodes base32k UTF-16 code units with the given config.
///
/// This function is like [`decode_utf16`], but takes a configuration object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_utf16_with<I>(
    units: I,
    config: DecodeConfig,
) -> DecodeResult<Vec<u32>>
where
    I: IntoIterator<Item = u16>,
{
    logged(decode_codepoints(units.into_iter().map(u32::from), config))
}

/// Decodes a base32k `str` with the given config.
///
/// This function is like [`decode_str`], but takes a configuration object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_str_with(
    s: &str,
    config: DecodeConfig,
) -> DecodeResult<Vec<u32>> {
    decode_chars_with(s.chars(), config)
}
