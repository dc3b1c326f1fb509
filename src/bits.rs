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

//! Bit cursors over a sequence of 32-bit words.
//!
//! The words are treated as one bitstream, most significant bit first, with
//! bit 0 being the high bit of the first word. Groups of 15 bits are read or
//! written at a position that always advances by 15, so a group either lies
//! within a single word (offset <= 17) or straddles two.

use super::alphabet::Group;
use super::{BITS_PER_GROUP, BITS_PER_WORD};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// The largest in-word offset at which a whole group still fits.
const MAX_ALIGNED_OFFSET: u32 = BITS_PER_WORD - BITS_PER_GROUP;

fn locate(pos: u64) -> (usize, u32) {
    let word = BITS_PER_WORD as u64;
    ((pos / word) as usize, (pos % word) as u32)
}

pub struct BitReader<'a> {
    words: &'a [u32],
    pos: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(words: &'a [u32]) -> Self {
        Self {
            words,
            pos: 0,
        }
    }

    pub fn bit_len(&self) -> u64 {
        self.words.len() as u64 * u64::from(BITS_PER_WORD)
    }

    /// Reads past the end of the slice yield zero bits.
    fn word(&self, index: usize) -> u32 {
        self.words.get(index).copied().unwrap_or(0)
    }

    /// The number of groups left to read.
    pub fn remaining_groups(&self) -> u64 {
        let left = self.bit_len().saturating_sub(self.pos);
        (left + u64::from(BITS_PER_GROUP) - 1) / u64::from(BITS_PER_GROUP)
    }

    /// Bits consumed past the end of the data. Only meaningful once
    /// [`Self::read_group`] has returned [`None`].
    pub fn overshoot(&self) -> u32 {
        self.pos.saturating_sub(self.bit_len()) as u32
    }

    pub fn read_group(&mut self) -> Option<Group> {
        if self.pos >= self.bit_len() {
            return None;
        }
        let (index, offset) = locate(self.pos);
        let bits = if offset <= MAX_ALIGNED_OFFSET {
            self.word(index) >> (MAX_ALIGNED_OFFSET - offset)
        } else {
            let spill = offset - MAX_ALIGNED_OFFSET;
            (self.word(index) << spill)
                | (self.word(index + 1) >> (BITS_PER_WORD - spill))
        };
        self.pos += u64::from(BITS_PER_GROUP);
        Some(Group::from_masked(bits))
    }
}

/// Reassembles groups into words, growing the output as groups reach into
/// new words.
#[cfg(feature = "alloc")]
pub struct BitWriter {
    words: Vec<u32>,
    pos: u64,
}

#[cfg(feature = "alloc")]
impl BitWriter {
    pub fn with_capacity(words: usize) -> Self {
        Self {
            words: Vec::with_capacity(words),
            pos: 0,
        }
    }

    /// The number of bits written so far, padding included.
    pub fn position(&self) -> u64 {
        self.pos
    }

    fn word_mut(&mut self, index: usize) -> &mut u32 {
        if self.words.len() <= index {
            self.words.resize(index + 1, 0);
        }
        &mut self.words[index]
    }

    pub fn write_group(&mut self, g: Group) {
        let (index, offset) = locate(self.pos);
        let bits = u32::from(g);
        if offset <= MAX_ALIGNED_OFFSET {
            *self.word_mut(index) |= bits << (MAX_ALIGNED_OFFSET - offset);
        } else {
            let spill = offset - MAX_ALIGNED_OFFSET;
            *self.word_mut(index) |= bits >> spill;
            // High bits shifted out here belong to the previous word.
            *self.word_mut(index + 1) |= bits << (BITS_PER_WORD - spill);
        }
        self.pos += u64::from(BITS_PER_GROUP);
    }

    pub fn into_words(self) -> Vec<u32> {
        self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_groups_across_word_boundaries() {
        let words = [0x1234_5678, 0x9abc_def0];
        let mut reader = BitReader::new(&words);
        assert_eq!(reader.remaining_groups(), 5);
        let groups: Vec<u16> = core::iter::from_fn(|| reader.read_group())
            .map(u16::from)
            .collect();
        let stream = (u128::from(words[0]) << 32 | u128::from(words[1])) << 11;
        let expected: Vec<u16> = (0..5_u32)
            .map(|i| ((stream >> (75 - 15 * (i + 1))) & 0x7fff) as u16)
            .collect();
        assert_eq!(groups, expected);
        assert_eq!(reader.overshoot(), 11);
    }

    #[test]
    fn reads_zeros_past_the_end() {
        let mut reader = BitReader::new(&[u32::MAX]);
        assert_eq!(reader.read_group(), Some(Group::MAX));
        assert_eq!(reader.read_group(), Some(Group::MAX));
        assert_eq!(reader.read_group().map(Group::get), Some(0b11 << 13));
        assert_eq!(reader.read_group(), None);
        assert_eq!(reader.overshoot(), 13);
    }

    #[test]
    fn writer_grows_into_straddled_word() {
        let mut writer = BitWriter::with_capacity(1);
        writer.write_group(Group::MAX);
        writer.write_group(Group::MAX);
        assert_eq!(writer.position(), 30);
        assert_eq!(writer.words.len(), 1);
        writer.write_group(Group::MAX);
        assert_eq!(writer.into_words(), vec![u32::MAX, 0xfff8_0000]);
    }
}
