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

//! The base32k alphabet.
//!
//! Every 15-bit group maps to one code point from three contiguous ranges
//! that are unaffected by Unicode normalization, composition, and
//! decomposition:
//!
//! | Groups            | Code points           |
//! |-------------------|-----------------------|
//! | 0 thru 6581       | U+3400 thru U+4DB5    |
//! | 6582 thru 27483   | U+4E00 thru U+9FA5    |
//! | 27484 thru 32767  | U+E000 thru U+F4A3    |
//!
//! Encoded text always ends with a terminator from U+2401 thru U+240F, whose
//! offset from U+2400 is the number of significant bits in the preceding
//! character.

use super::BITS_PER_GROUP;

use core::convert::TryFrom;

/// A 15-bit value extracted from the word bitstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(u16);

impl Group {
    /// The largest group, `0x7fff`.
    pub const MAX: Self = Self(0x7fff);

    /// Returns [`None`] if `x` does not fit in 15 bits.
    pub fn new(x: u16) -> Option<Self> {
        (x <= Self::MAX.0).then(|| Self(x))
    }

    /// Keeps only the low 15 bits of `x`.
    pub const fn from_masked(x: u32) -> Self {
        Self((x & Self::MAX.0 as u32) as u16)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<Group> for u16 {
    fn from(g: Group) -> u16 {
        g.0
    }
}

impl From<Group> for u32 {
    fn from(g: Group) -> u32 {
        g.0.into()
    }
}

/// The number of significant bits (1 thru 15) in the last data character,
/// as recorded by the terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TailBits(u8);

impl TailBits {
    /// Every bit of the last data character is significant.
    pub const FULL: Self = Self(BITS_PER_GROUP as u8);

    /// Returns [`None`] unless `bits` is in `1..=15`.
    pub fn new(bits: u8) -> Option<Self> {
        (1..=Self::FULL.0).contains(&bits).then(|| Self(bits))
    }

    /// Derives the significant-bit count from the number of bits the last
    /// group read past the end of the data.
    pub(crate) fn from_overshoot(overshoot: u32) -> Self {
        debug_assert!(overshoot < BITS_PER_GROUP);
        Self(Self::FULL.0 - (overshoot % BITS_PER_GROUP) as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_full(self) -> bool {
        self.0 == Self::FULL.0
    }

    /// The number of low-order padding bits in the last data character.
    pub const fn padding(self) -> u8 {
        Self::FULL.0 - self.0
    }
}

struct Range {
    start: u16,
    first: u16,
    len: u16,
}

impl Range {
    const fn end(&self) -> u16 {
        self.start + (self.len - 1)
    }
}

const RANGES: [Range; 3] = [
    Range {
        start: 0x3400,
        first: 0,
        len: 6582,
    },
    Range {
        start: 0x4e00,
        first: 6582,
        len: 20902,
    },
    Range {
        start: 0xe000,
        first: 27484,
        len: 5284,
    },
];

const TERMINATOR_BASE: u16 = 0x2400;

const TERMINATORS: [char; 15] = [
    '\u{2401}', '\u{2402}', '\u{2403}', '\u{2404}', '\u{2405}', '\u{2406}',
    '\u{2407}', '\u{2408}', '\u{2409}', '\u{240a}', '\u{240b}', '\u{240c}',
    '\u{240d}', '\u{240e}', '\u{240f}',
];

/// Maps a group to its UTF-16 code unit.
pub fn to_unit(g: Group) -> u16 {
    let g = g.get();
    RANGES
        .iter()
        .find(|r| g < r.first + r.len)
        .map_or(RANGES[2].end(), |r| r.start + (g - r.first))
}

/// Maps a group to its character.
pub fn to_char(g: Group) -> char {
    // None of the ranges touch the surrogates.
    char::from_u32(to_unit(g).into()).unwrap()
}

/// Maps a code point back to its group, or returns [`None`] if it lies
/// outside all three data ranges.
pub fn from_char(c: u32) -> Option<Group> {
    RANGES
        .iter()
        .find(|r| (u32::from(r.start)..=u32::from(r.end())).contains(&c))
        .map(|r| Group(r.first + (c as u16 - r.start)))
}

pub fn to_terminator(bits: TailBits) -> char {
    TERMINATORS[usize::from(bits.get() - 1)]
}

pub fn to_terminator_unit(bits: TailBits) -> u16 {
    TERMINATOR_BASE + u16::from(bits.get())
}

/// Returns the significant-bit count recorded by a terminator, or [`None`]
/// if `c` is not one.
pub fn from_terminator(c: u32) -> Option<TailBits> {
    c.checked_sub(TERMINATOR_BASE.into())
        .and_then(|n| u8::try_from(n).ok())
        .and_then(TailBits::new)
}
