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

//! Functions and types for encoding words as base32k text.

use super::alphabet::{self, TailBits};
use super::bits::BitReader;
use super::{BITS_PER_GROUP, BITS_PER_WORD};

use core::convert::TryFrom;
use core::iter::FusedIterator;

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

enum UnitEncoderState {
    Running,
    Done,
}

/// Iterator returned by [`encode_to_utf16_iter`].
pub struct Utf16Encoder<'a> {
    reader: BitReader<'a>,
    state: UnitEncoderState,
}

impl<'a> Utf16Encoder<'a> {
    pub(crate) fn new(words: &'a [u32]) -> Self {
        Self {
            reader: BitReader::new(words),
            state: UnitEncoderState::Running,
        }
    }

    fn terminator(&self) -> TailBits {
        TailBits::from_overshoot(self.reader.overshoot())
    }

    fn remaining(&self) -> Option<usize> {
        match self.state {
            UnitEncoderState::Running => self
                .reader
                .remaining_groups()
                .checked_add(1)
                .and_then(|n| usize::try_from(n).ok()),
            UnitEncoderState::Done => Some(0),
        }
    }
}

impl<'a> Iterator for Utf16Encoder<'a> {
    type Item = u16;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            UnitEncoderState::Running => {
                self.reader.read_group().map(alphabet::to_unit).or_else(|| {
                    self.state = UnitEncoderState::Done;
                    Some(alphabet::to_terminator_unit(self.terminator()))
                })
            }
            UnitEncoderState::Done => None,
        }
    }

    fn fold<B, F>(mut self, mut init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        if let UnitEncoderState::Done = self.state {
            return init;
        }
        while let Some(g) = self.reader.read_group() {
            init = f(init, alphabet::to_unit(g));
        }
        f(init, alphabet::to_terminator_unit(self.terminator()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining().map_or((usize::MAX, None), |n| (n, Some(n)))
    }
}

impl<'a> ExactSizeIterator for Utf16Encoder<'a> {}

impl<'a> FusedIterator for Utf16Encoder<'a> {}

/// Iterator returned by [`encode_to_chars`].
pub struct CharEncoder<'a>(Utf16Encoder<'a>);

impl<'a> CharEncoder<'a> {
    pub(crate) fn new(words: &'a [u32]) -> Self {
        Self(Utf16Encoder::new(words))
    }
}

fn unit_to_char(unit: u16) -> char {
    // The encoder only emits units from the alphabet, none of which are
    // surrogates.
    char::from_u32(unit.into()).unwrap()
}

impl<'a> Iterator for CharEncoder<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(unit_to_char)
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, |b, unit| f(b, unit_to_char(unit)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for CharEncoder<'a> {}

impl<'a> FusedIterator for CharEncoder<'a> {}

/// The number of characters, terminator included, that encoding
/// `word_count` words produces, or [`None`] on overflow.
pub fn encoded_len(word_count: usize) -> Option<usize> {
    let group = BITS_PER_GROUP as usize;
    word_count
        .checked_mul(BITS_PER_WORD as usize)
        .and_then(|n| n.checked_add(group - 1))
        .map(|n| n / group + 1)
}

/// Lazily encodes `words` as a sequence of chars.
pub fn encode_to_chars(words: &[u32]) -> CharEncoder<'_> {
    CharEncoder::new(words)
}

/// Lazily encodes `words` as UTF-16 code units. Each character of the
/// encoding is exactly one unit.
pub fn encode_to_utf16_iter(words: &[u32]) -> Utf16Encoder<'_> {
    Utf16Encoder::new(words)
}

/// Encodes `words` as a [`String`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string(words: &[u32]) -> String {
    let chars = encode_to_chars(words);
    // Every alphabet char is three bytes of UTF-8.
    let mut s = String::with_capacity(chars.len().saturating_mul(3));
    s.extend(chars);
    log::trace!("encoded {} words into {} bytes", words.len(), s.len());
    s
}

/// Encodes `words` as UTF-16 code units.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_utf16(words: &[u32]) -> Vec<u16> {
    let units: Vec<u16> = encode_to_utf16_iter(words).collect();
    log::trace!("encoded {} words into {} units", words.len(), units.len());
    units
}
